//! HTTP request layer for the RAG service

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use routes::app_router;
pub use server::build_app;
pub use server::serve_api;
