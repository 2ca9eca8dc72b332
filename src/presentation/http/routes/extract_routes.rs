use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::ExtractHandler;

pub fn extract_routes(extract_handler: Arc<ExtractHandler>) -> Router {
    Router::new()
        .route("/api/pdf-extract", post(ExtractHandler::extract_pdf))
        .with_state(extract_handler)
}
