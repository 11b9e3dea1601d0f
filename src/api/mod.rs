//! API Module
//!
//! HTTP handlers and routing for the dictionary REST API.
//!
//! # Endpoints
//! - `POST /add` - Store or replace a word
//! - `GET /define/:word` - Look up a word
//! - `DELETE /remove/:word` - Remove a word
//! - `GET /list` - List all words
//! - `GET /health` - Health check endpoint

pub mod auth;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
