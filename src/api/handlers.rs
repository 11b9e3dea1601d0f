//! API Handlers
//!
//! HTTP request handlers for each dictionary endpoint. Handlers only talk to
//! the store through the `EntryStore` operations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::models::{
    AddRequest, AddResponse, EntryResponse, HealthResponse, ListResponse, RemoveResponse,
};
use crate::store::EntryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store shared by every request
    pub store: Arc<dyn EntryStore>,
    /// Value required in the Authorization header; None disables the check
    pub auth_token: Option<Arc<str>>,
}

impl AppState {
    /// Creates a new AppState with the given store and no authentication.
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self {
            store,
            auth_token: None,
        }
    }

    /// Requires `token` in the Authorization header of protected routes.
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.map(Arc::from);
        self
    }
}

/// Handler for POST /add
///
/// Validates the payload, then inserts or replaces the entry.
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<Json<AddResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::Validation(error_msg));
    }

    state.store.upsert(req.word.clone(), req.definition).await?;
    info!(word = %req.word, "Word added");

    Ok(Json(AddResponse::new(req.word)))
}

/// Handler for GET /define/:word
pub async fn define_handler(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> Result<Json<EntryResponse>> {
    let entry = state.store.lookup(&word).await?;
    Ok(Json(EntryResponse::from(entry)))
}

/// Handler for DELETE /remove/:word
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(word): Path<String>,
) -> Result<Json<RemoveResponse>> {
    state.store.delete(&word).await?;
    info!(word = %word, "Word removed");

    Ok(Json(RemoveResponse::new(word)))
}

/// Handler for GET /list
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<ListResponse>> {
    let snapshot = state.store.enumerate().await?;
    Ok(Json(ListResponse::from(snapshot)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
