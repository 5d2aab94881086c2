//! # Uniplan Common Library
//!
//! Shared code for the uniplan modules including:
//! - Database models and choice-list queries
//! - Error types
//! - Bootstrap configuration loading

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
