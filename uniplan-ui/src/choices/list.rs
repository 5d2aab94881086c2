//! In-memory ranked shortlist
//!
//! An ordered sequence of hydrated program details, mutated only through
//! `&mut` operations. Rank is positional: an entry's order value is derived
//! from its index at save time, never stored alongside the entry.

use crate::types::ProgramDetail;
use uniplan_common::db::ChoiceEntry;
use uniplan_common::{Error, Result};
use uuid::Uuid;

/// Ordered shortlist of program choices, unique by program id
#[derive(Debug, Default)]
pub struct ChoiceList {
    entries: Vec<ProgramDetail>,
}

impl ChoiceList {
    /// Create new empty shortlist
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Current sequence, in rank order
    pub fn entries(&self) -> &[ProgramDetail] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry with this program id is present
    pub fn contains(&self, program_id: &str) -> bool {
        self.entries.iter().any(|e| e.program_id == program_id)
    }

    /// Append a hydrated detail unless its program id is already present
    ///
    /// Returns false for the duplicate case; a duplicate add is a no-op,
    /// not an error.
    pub fn add(&mut self, detail: ProgramDetail) -> bool {
        if self.contains(&detail.program_id) {
            return false;
        }
        self.entries.push(detail);
        true
    }

    /// Remove the entry with this program id
    ///
    /// Returns false (leaving the sequence untouched) when absent.
    pub fn remove(&mut self, program_id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.program_id != program_id);
        self.entries.len() != before
    }

    /// Move the entry at `from` to position `to`, shifting the rest
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.entries.len();
        if from >= len || to >= len {
            return Err(Error::InvalidInput(format!(
                "Reorder indices {}..{} out of range for {} entries",
                from, to, len
            )));
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        Ok(())
    }

    /// Replace the whole sequence (load / rollback)
    pub fn replace(&mut self, entries: Vec<ProgramDetail>) {
        self.entries = entries;
    }

    /// Derive persisted rows from the current order
    ///
    /// `choice_order` is the zero-based position, contiguous by
    /// construction. Each row gets a fresh UUID.
    pub fn derive_rows(&self, user_id: &str) -> Vec<ChoiceEntry> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, detail)| ChoiceEntry {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                program_id: detail.program_id.clone(),
                choice_order: index as i64,
            })
            .collect()
    }
}
