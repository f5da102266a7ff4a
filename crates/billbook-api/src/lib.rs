//! billbook-api - reference REST backend for the billbook client
//!
//! Serves the `/bills` and `/itens` collections from memory.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

pub use routes::{app_router, AppState};
