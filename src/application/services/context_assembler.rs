use crate::domain::entities::UserSchema;

/// The assistant persona. Every assembled prompt starts with this string;
/// grounding context is only ever appended to it.
pub const BASE_PROMPT: &str =
    "You are a friendly assistant! Keep your responses concise and helpful. Your name is Schemac.";

/// Builds the per-turn system prompt from the cached attachment text and the
/// schemas the caller selected. Ephemeral output; never persisted.
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Base prompt, then the shared-document block when attachment text is
    /// non-empty, then one block per schema in caller-supplied order. Empty
    /// inputs yield exactly the base prompt.
    pub fn assemble(&self, attachment_text: &str, schemas: &[UserSchema]) -> String {
        let mut prompt = String::from(BASE_PROMPT);

        if !attachment_text.trim().is_empty() {
            prompt.push_str(
                "\n\nThe user has shared a document with the following content:\n\n",
            );
            prompt.push_str(attachment_text);
            prompt.push_str(
                "\n\nPlease reference this content when answering questions about the document.",
            );
        }

        for schema in schemas {
            let columns = serde_json::to_string(schema.content()).unwrap_or_default();
            let doc_text = serde_json::to_string(schema.doc_text()).unwrap_or_default();

            prompt.push_str(&format!("\n\nSchema Name: {}\n\n", schema.name()));
            prompt.push_str(&format!("Schema Content: {}\n\n", columns));
            prompt.push_str(&format!(
                "Schema Description: {}\n\n",
                schema.description().unwrap_or_default()
            ));
            prompt.push_str(&format!("Schema DocText: {}", doc_text));
        }

        prompt
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new()
    }
}
