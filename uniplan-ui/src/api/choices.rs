//! Choice list endpoints
//!
//! Every handler resolves the caller's controller from the session
//! registry and holds its mutex for the duration of the request, so all
//! mutation of one user's shortlist is serialized.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::{CatalogMeta, ProgramDetail};
use crate::AppState;
use uniplan_common::Error;

/// Request body naming one program
#[derive(Debug, Deserialize)]
pub struct ProgramRequest {
    pub program_id: String,
}

/// Request body for a reorder gesture
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

/// Current shortlist, in rank order
#[derive(Debug, Serialize)]
pub struct ChoiceListResponse {
    pub user_id: String,
    pub entries: Vec<ProgramDetail>,
}

/// Result of an add/remove mutation
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    /// false when the operation was a no-op (duplicate add, absent remove)
    pub changed: bool,
    pub entries: Vec<ProgramDetail>,
}

/// Save confirmation
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: usize,
}

/// GET /api/choices/:user_id
///
/// Returns the in-memory shortlist, loading and hydrating the persisted
/// set on the first touch of this user's session.
pub async fn get_choices(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ChoiceListResponse>, ApiError> {
    let catalog = state.catalog_entries().await?;
    let controller = state.controller(&user_id).await;
    let mut controller = controller.lock().await;

    controller.ensure_loaded(&catalog, &state.details).await?;

    Ok(Json(ChoiceListResponse {
        user_id,
        entries: controller.entries().to_vec(),
    }))
}

/// POST /api/choices/:user_id/add
///
/// Hydrates the program named in the body and appends it. A program id
/// already on the shortlist is a no-op, not an error; a program id missing
/// from the catalog is a 404.
pub async fn add_choice(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ProgramRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let catalog = state.catalog_entries().await?;

    let entry = catalog
        .iter()
        .find(|c| c.program_id == request.program_id)
        .ok_or_else(|| Error::NotFound(format!("Program {} not in catalog", request.program_id)))?;
    let meta = CatalogMeta::from_entry(entry);

    let controller = state.controller(&user_id).await;
    let mut controller = controller.lock().await;
    controller.ensure_loaded(&catalog, &state.details).await?;

    // Hydration failure aborts this addition only; the list is untouched
    let detail = state.details.hydrate(&request.program_id, &meta).await?;
    let changed = controller.add(detail);

    Ok(Json(MutationResponse {
        changed,
        entries: controller.entries().to_vec(),
    }))
}

/// POST /api/choices/:user_id/remove
pub async fn remove_choice(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ProgramRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let catalog = state.catalog_entries().await?;
    let controller = state.controller(&user_id).await;
    let mut controller = controller.lock().await;
    controller.ensure_loaded(&catalog, &state.details).await?;

    let changed = controller.remove(&request.program_id);

    Ok(Json(MutationResponse {
        changed,
        entries: controller.entries().to_vec(),
    }))
}

/// POST /api/choices/:user_id/reorder
pub async fn reorder_choices(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<ChoiceListResponse>, ApiError> {
    let catalog = state.catalog_entries().await?;
    let controller = state.controller(&user_id).await;
    let mut controller = controller.lock().await;
    controller.ensure_loaded(&catalog, &state.details).await?;

    controller.reorder(request.from, request.to)?;

    Ok(Json(ChoiceListResponse {
        user_id,
        entries: controller.entries().to_vec(),
    }))
}

/// POST /api/choices/:user_id/save
///
/// Wholesale-replaces the persisted set with the current order. On failure
/// the in-memory list rolls back to the last persisted snapshot and the
/// client sees one error for the whole batch.
pub async fn save_choices(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<SaveResponse>, ApiError> {
    let catalog = state.catalog_entries().await?;
    let controller = state.controller(&user_id).await;
    let mut controller = controller.lock().await;
    controller.ensure_loaded(&catalog, &state.details).await?;

    let saved = controller.save().await?;

    Ok(Json(SaveResponse { saved }))
}
