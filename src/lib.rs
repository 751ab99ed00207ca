pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod rooms;
pub mod routes;
pub mod store;
pub mod templates;

pub use app::{build_router, App, AppState};
