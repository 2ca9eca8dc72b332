use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A conversation between one user and the assistant. Created lazily on the
/// first turn; the owner never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    id: Uuid,
    user_id: Uuid,
    title: String,
    created_at: DateTime<Utc>,
}

impl Chat {
    pub fn new(id: Uuid, user_id: Uuid, title: String) -> Self {
        Self {
            id,
            user_id,
            title,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let chat = Chat::new(Uuid::new_v4(), owner, "Trip planning".to_string());

        assert!(chat.is_owned_by(owner));
        assert!(!chat.is_owned_by(other));
        assert_eq!(chat.title(), "Trip planning");
    }
}
