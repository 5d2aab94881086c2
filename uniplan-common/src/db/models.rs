//! Database models

use serde::{Deserialize, Serialize};

/// One persisted choice-list row
///
/// `choice_order` is a zero-based rank, contiguous and unique within a
/// user's set. It is the sole ordering signal; no timestamps are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceEntry {
    pub id: String,
    pub user_id: String,
    pub program_id: String,
    pub choice_order: i64,
}
