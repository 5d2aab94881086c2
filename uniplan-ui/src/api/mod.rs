//! HTTP API handlers for uniplan-ui

pub mod catalog;
pub mod choices;
pub mod health;

pub use catalog::search_catalog;
pub use choices::{add_choice, get_choices, remove_choice, reorder_choices, save_choices};
pub use health::health_check;
