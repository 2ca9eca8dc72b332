use async_trait::async_trait;
use uuid::Uuid;

/// Identity of an authenticated caller. The orchestrator depends only on
/// this shape, not on how the session was established.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthResult {
    pub caller_id: Uuid,
    pub caller_email: String,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves a bearer credential to a caller identity, or `None` when the
    /// credential is missing or invalid.
    async fn authenticate(&self, bearer: Option<&str>) -> Option<AuthResult>;
}
