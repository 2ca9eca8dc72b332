use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::SchemaHandler;

pub fn schema_routes(schema_handler: Arc<SchemaHandler>) -> Router {
    Router::new()
        .route(
            "/api/schema",
            post(SchemaHandler::create_schema)
                .get(SchemaHandler::list_schemas)
                .put(SchemaHandler::update_schema)
                .delete(SchemaHandler::delete_schema),
        )
        .with_state(schema_handler)
}
