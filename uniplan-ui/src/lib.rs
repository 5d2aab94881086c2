//! uniplan-ui library - Ranked Choice List module
//!
//! Students search the program catalog, hydrate per-program detail from the
//! object store, and maintain a ranked shortlist persisted as wholesale-
//! replaced rows. This crate wires those components behind an HTTP surface.

use axum::Router;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub mod api;
pub mod catalog;
pub mod choices;
pub mod error;
pub mod services;
pub mod types;

use catalog::CatalogClient;
use choices::{ChoiceController, ChoiceStore, SqliteChoiceStore};
use services::DetailClient;
use types::CatalogEntry;
use uniplan_common::Result;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Catalog snapshot client
    pub catalog: Arc<CatalogClient>,
    /// Program detail / round client
    pub details: Arc<DetailClient>,
    /// Choice persistence boundary
    pub store: Arc<dyn ChoiceStore>,
    /// Catalog snapshot, loaded once per process
    catalog_cache: Arc<RwLock<Option<Arc<Vec<CatalogEntry>>>>>,
    /// Per-user controllers; the mutex gives each user a single writer
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<ChoiceController>>>>>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, catalog_url: &str, asset_base_url: &str) -> Result<Self> {
        let store: Arc<dyn ChoiceStore> = Arc::new(SqliteChoiceStore::new(db.clone()));
        Ok(Self {
            db,
            catalog: Arc::new(CatalogClient::new(catalog_url)?),
            details: Arc::new(DetailClient::new(asset_base_url)?),
            store,
            catalog_cache: Arc::new(RwLock::new(None)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// The catalog snapshot, fetching it on first use
    ///
    /// The snapshot is immutable for the process lifetime; a failed first
    /// load is not cached, so the next request retries.
    pub async fn catalog_entries(&self) -> Result<Arc<Vec<CatalogEntry>>> {
        if let Some(entries) = self.catalog_cache.read().await.as_ref() {
            return Ok(entries.clone());
        }

        let mut cache = self.catalog_cache.write().await;
        // Another request may have filled the cache while we waited
        if let Some(entries) = cache.as_ref() {
            return Ok(entries.clone());
        }

        let entries = Arc::new(self.catalog.load().await?);
        *cache = Some(entries.clone());
        Ok(entries)
    }

    /// The controller for one user, creating it on first touch
    pub async fn controller(&self, user_id: &str) -> Arc<Mutex<ChoiceController>> {
        if let Some(controller) = self.sessions.read().await.get(user_id) {
            return controller.clone();
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(user_id.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(ChoiceController::new(user_id, self.store.clone())))
            })
            .clone()
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/health", get(api::health_check))
        .route("/api/catalog", get(api::search_catalog))
        .route("/api/choices/:user_id", get(api::get_choices))
        .route("/api/choices/:user_id/add", post(api::add_choice))
        .route("/api/choices/:user_id/remove", post(api::remove_choice))
        .route("/api/choices/:user_id/reorder", post(api::reorder_choices))
        .route("/api/choices/:user_id/save", post(api::save_choices))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
