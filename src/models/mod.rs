//! Request and Response models for the dictionary API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::AddRequest;
pub use responses::{AddResponse, EntryResponse, HealthResponse, ListResponse, RemoveResponse};
