use std::collections::HashMap;
use std::env;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::auth::{AuthProvider, AuthResult};

/// Bearer-token session table. How sessions come to exist is outside the
/// core; this keeps the orchestrator's view down to "token in, identity
/// out". Tokens can be seeded from the environment at boot
/// (`SESSION_TOKEN`, `SESSION_USER_ID`, `SESSION_USER_EMAIL`).
pub struct BearerSessionAuth {
    sessions: RwLock<HashMap<String, AuthResult>>,
}

impl BearerSessionAuth {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_env() -> Self {
        let mut sessions = HashMap::new();
        if let Ok(token) = env::var("SESSION_TOKEN") {
            let caller_id = env::var("SESSION_USER_ID")
                .ok()
                .and_then(|v| Uuid::parse_str(&v).ok())
                .unwrap_or_else(Uuid::new_v4);
            let caller_email =
                env::var("SESSION_USER_EMAIL").unwrap_or_else(|_| "user@localhost".to_string());
            sessions.insert(
                token,
                AuthResult {
                    caller_id,
                    caller_email,
                },
            );
        }
        Self {
            sessions: RwLock::new(sessions),
        }
    }

    pub async fn register_session(&self, token: String, identity: AuthResult) {
        self.sessions.write().await.insert(token, identity);
    }

    pub async fn revoke_session(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

impl Default for BearerSessionAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for BearerSessionAuth {
    async fn authenticate(&self, bearer: Option<&str>) -> Option<AuthResult> {
        let token = bearer?;
        self.sessions.read().await.get(token).cloned()
    }
}
