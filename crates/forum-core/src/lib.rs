//! # forum-core
//!
//! Core crate for the forum server. Contains collaborator traits,
//! configuration schemas, typed identifiers, shared records, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other forum crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
