use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{ColumnDef, DocText, UserSchema};

#[derive(Debug, Deserialize)]
pub struct CreateSchemaDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: Vec<ColumnDef>,
    #[serde(rename = "docText", default)]
    pub doc_text: Vec<DocText>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSchemaDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: Vec<ColumnDef>,
    #[serde(rename = "docText", default)]
    pub doc_text: Vec<DocText>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteSchemaQueryDto {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SchemaResponseDto {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub content: Vec<ColumnDef>,
    #[serde(rename = "docText")]
    pub doc_text: Vec<DocText>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<UserSchema> for SchemaResponseDto {
    fn from(schema: UserSchema) -> Self {
        Self {
            id: schema.id(),
            user_id: schema.user_id(),
            name: schema.name().to_string(),
            description: schema.description().map(str::to_string),
            content: schema.content().to_vec(),
            doc_text: schema.doc_text().to_vec(),
            created_at: schema.created_at(),
            updated_at: schema.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedSchemaDto {
    pub id: Uuid,
    pub message: String,
}
