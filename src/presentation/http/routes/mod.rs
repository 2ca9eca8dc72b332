pub mod chat_routes;
pub mod extract_routes;
pub mod health_routes;
pub mod schema_routes;

pub use chat_routes::*;
pub use extract_routes::*;
pub use health_routes::*;
pub use schema_routes::*;
