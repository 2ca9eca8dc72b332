pub mod auth;
pub mod container;
pub mod external_services;
pub mod extractors;
pub mod memory;

pub use container::AppContainer;
