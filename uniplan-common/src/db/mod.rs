//! Database models and queries

pub mod choices;
pub mod init;
pub mod models;

pub use choices::*;
pub use init::*;
pub use models::*;
