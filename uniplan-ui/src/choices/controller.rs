//! Choice list controller
//!
//! Owns one user's shortlist and its persistence boundary. All mutation
//! goes through this controller, so there is exactly one writer per user;
//! the service keeps each controller behind an async mutex.
//!
//! The controller tracks the last persisted sequence as a snapshot. A
//! failed save restores that snapshot instead of leaving the in-memory
//! list diverged from the stored set.

use crate::choices::{ChoiceList, ChoiceStore};
use crate::services::DetailClient;
use crate::types::{CatalogEntry, CatalogMeta, ProgramDetail};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uniplan_common::{Error, Result};

pub struct ChoiceController {
    user_id: String,
    store: Arc<dyn ChoiceStore>,
    list: ChoiceList,
    /// Last sequence known to match the persisted set
    persisted: Vec<ProgramDetail>,
    loaded: bool,
}

impl ChoiceController {
    /// Create a controller for one user
    pub fn new(user_id: impl Into<String>, store: Arc<dyn ChoiceStore>) -> Self {
        Self {
            user_id: user_id.into(),
            store,
            list: ChoiceList::new(),
            persisted: Vec::new(),
            loaded: false,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Current in-memory sequence, in rank order
    pub fn entries(&self) -> &[ProgramDetail] {
        self.list.entries()
    }

    /// Load the persisted shortlist and hydrate it
    ///
    /// Rows whose program id is missing from the catalog are skipped; the
    /// rest hydrate concurrently. Any hydration failure aborts the load and
    /// leaves the current in-memory sequence intact.
    pub async fn load(&mut self, catalog: &[CatalogEntry], details: &DetailClient) -> Result<()> {
        let rows = self.store.get(&self.user_id).await?;

        let mut targets: Vec<(String, CatalogMeta)> = Vec::with_capacity(rows.len());
        for row in &rows {
            match catalog.iter().find(|c| c.program_id == row.program_id) {
                Some(entry) => targets.push((row.program_id.clone(), CatalogMeta::from_entry(entry))),
                None => {
                    warn!(
                        "Skipping persisted choice {}: not in catalog",
                        row.program_id
                    );
                }
            }
        }

        let hydrated = try_join_all(
            targets
                .iter()
                .map(|(program_id, meta)| details.hydrate(program_id, meta)),
        )
        .await?;

        debug!(
            "Loaded {} of {} persisted choices for {}",
            hydrated.len(),
            rows.len(),
            self.user_id
        );

        self.persisted = hydrated.clone();
        self.list.replace(hydrated);
        self.loaded = true;
        Ok(())
    }

    /// Load once; later calls are no-ops
    pub async fn ensure_loaded(
        &mut self,
        catalog: &[CatalogEntry],
        details: &DetailClient,
    ) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        self.load(catalog, details).await
    }

    /// Append a hydrated detail; no-op if the program is already present
    pub fn add(&mut self, detail: ProgramDetail) -> bool {
        self.list.add(detail)
    }

    /// Remove by program id; no-op when absent
    pub fn remove(&mut self, program_id: &str) -> bool {
        self.list.remove(program_id)
    }

    /// Move the entry at `from` to position `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.list.reorder(from, to)
    }

    /// Persist the current order, wholesale-replacing the stored set
    ///
    /// On failure the in-memory sequence is rolled back to the last
    /// persisted snapshot, so client and stored state never diverge.
    pub async fn save(&mut self) -> Result<usize> {
        let rows = self.list.derive_rows(&self.user_id);
        let count = rows.len();

        match self.store.replace(&self.user_id, &rows).await {
            Ok(()) => {
                self.persisted = self.list.entries().to_vec();
                info!("Saved {} choices for {}", count, self.user_id);
                Ok(count)
            }
            Err(e) => {
                self.list.replace(self.persisted.clone());
                Err(Error::Persist(e.to_string()))
            }
        }
    }
}
