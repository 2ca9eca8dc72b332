pub mod chat_handler;
pub mod extract_handler;
pub mod schema_handler;

pub use chat_handler::ChatHandler;
pub use extract_handler::ExtractHandler;
pub use schema_handler::SchemaHandler;

use axum::http::HeaderMap;

use crate::application::ports::auth::{AuthProvider, AuthResult};
use crate::presentation::http::error::AppError;

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub(crate) async fn require_auth(
    auth: &dyn AuthProvider,
    headers: &HeaderMap,
) -> Result<AuthResult, AppError> {
    auth.authenticate(bearer_token(headers))
        .await
        .ok_or(AppError::Unauthorized)
}
