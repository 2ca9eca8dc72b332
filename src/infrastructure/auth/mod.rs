pub mod bearer_session_auth;

pub use bearer_session_auth::BearerSessionAuth;
