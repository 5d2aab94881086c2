//! Ranked choice list
//!
//! The in-memory shortlist and its reconciliation with the persisted set.

pub mod controller;
pub mod list;
pub mod sortable;
pub mod store;

pub use controller::ChoiceController;
pub use list::ChoiceList;
pub use sortable::{resolve_drop_target, Point};
pub use store::{ChoiceStore, SqliteChoiceStore};
