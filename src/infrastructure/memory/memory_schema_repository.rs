use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::UserSchema;
use crate::domain::repositories::schema_repository::{SchemaRepository, SchemaRepositoryError};
use crate::infrastructure::memory::MemoryStore;

pub struct MemorySchemaRepository {
    store: Arc<MemoryStore>,
}

impl MemorySchemaRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SchemaRepository for MemorySchemaRepository {
    async fn save(&self, schema: &UserSchema) -> Result<(), SchemaRepositoryError> {
        self.store.insert_schema(schema.clone()).await;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserSchema>, SchemaRepositoryError> {
        Ok(self.store.schema(id).await)
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserSchema>, SchemaRepositoryError> {
        Ok(self.store.schemas_for_user(user_id).await)
    }

    async fn update(&self, schema: &UserSchema) -> Result<(), SchemaRepositoryError> {
        if self.store.schema(schema.id()).await.is_none() {
            return Err(SchemaRepositoryError::NotFound(schema.id()));
        }
        self.store.insert_schema(schema.clone()).await;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, SchemaRepositoryError> {
        Ok(self.store.remove_schema(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ColumnDef;

    fn columns() -> Vec<ColumnDef> {
        vec![ColumnDef {
            name: "id".to_string(),
            column_type: "int".to_string(),
            description: None,
            example_values: None,
        }]
    }

    #[tokio::test]
    async fn test_round_trip_survives_unrelated_writes() {
        let store = Arc::new(MemoryStore::new());
        let repo = MemorySchemaRepository::new(store);
        let owner = Uuid::new_v4();

        let schema = UserSchema::new(owner, "users".to_string(), None, columns(), vec![]);
        let id = schema.id();
        repo.save(&schema).await.unwrap();

        // Unrelated schema writes by another user.
        for i in 0..3 {
            let other = UserSchema::new(
                Uuid::new_v4(),
                format!("noise-{}", i),
                None,
                vec![],
                vec![],
            );
            repo.save(&other).await.unwrap();
        }

        let read_back = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(read_back.content(), schema.content());

        let listed = repo.find_by_user_id(owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content(), columns());
    }

    #[tokio::test]
    async fn test_update_requires_existing_row() {
        let store = Arc::new(MemoryStore::new());
        let repo = MemorySchemaRepository::new(store);

        let ghost = UserSchema::new(Uuid::new_v4(), "ghost".to_string(), None, vec![], vec![]);
        let result = repo.update(&ghost).await;

        assert!(matches!(result, Err(SchemaRepositoryError::NotFound(_))));
    }
}
