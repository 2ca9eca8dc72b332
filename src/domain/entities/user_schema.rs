use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One column definition inside a schema record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        rename = "exampleValues",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub example_values: Option<Vec<String>>,
}

/// A named document text attached to a schema record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocText {
    pub name: String,
    pub content: String,
}

/// A user-defined schema record: ordered column definitions plus attached
/// document texts. Mutated only by full-record replace, and only by its
/// owning user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSchema {
    id: Uuid,
    user_id: Uuid,
    name: String,
    description: Option<String>,
    content: Vec<ColumnDef>,
    doc_text: Vec<DocText>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserSchema {
    pub fn new(
        user_id: Uuid,
        name: String,
        description: Option<String>,
        content: Vec<ColumnDef>,
        doc_text: Vec<DocText>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            description,
            content,
            doc_text,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn content(&self) -> &[ColumnDef] {
        &self.content
    }

    pub fn doc_text(&self) -> &[DocText] {
        &self.doc_text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Full-record replace of the mutable fields; id and owner are fixed.
    pub fn replace(
        &mut self,
        name: String,
        description: Option<String>,
        content: Vec<ColumnDef>,
        doc_text: Vec<DocText>,
    ) {
        self.name = name;
        self.description = description;
        self.content = content;
        self.doc_text = doc_text;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef {
                name: "id".to_string(),
                column_type: "int".to_string(),
                description: None,
                example_values: None,
            },
            ColumnDef {
                name: "email".to_string(),
                column_type: "string".to_string(),
                description: Some("login address".to_string()),
                example_values: Some(vec!["a@b.c".to_string()]),
            },
        ]
    }

    #[test]
    fn test_replace_preserves_id_and_owner() {
        let owner = Uuid::new_v4();
        let mut schema = UserSchema::new(owner, "users".to_string(), None, sample_columns(), vec![]);
        let id = schema.id();

        schema.replace(
            "accounts".to_string(),
            Some("renamed".to_string()),
            vec![],
            vec![],
        );

        assert_eq!(schema.id(), id);
        assert_eq!(schema.user_id(), owner);
        assert_eq!(schema.name(), "accounts");
        assert!(schema.content().is_empty());
    }

    #[test]
    fn test_column_order_preserved_through_serde() {
        let schema = UserSchema::new(
            Uuid::new_v4(),
            "users".to_string(),
            None,
            sample_columns(),
            vec![],
        );

        let json = serde_json::to_string(&schema).unwrap();
        let back: UserSchema = serde_json::from_str(&json).unwrap();

        assert_eq!(back.content(), schema.content());
        assert_eq!(back.content()[0].name, "id");
        assert_eq!(back.content()[1].name, "email");
    }

    #[test]
    fn test_column_wire_naming() {
        let column = &sample_columns()[1];
        let json = serde_json::to_value(column).unwrap();

        assert_eq!(json["type"], "string");
        assert!(json.get("exampleValues").is_some());
        assert!(json.get("column_type").is_none());
    }
}
