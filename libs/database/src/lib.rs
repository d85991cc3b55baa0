//! Database library providing a MongoDB connector and shared utilities
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("learning");
//! let collection = db.collection::<Document>("learning_contents");
//! ```

// Always available modules
pub mod common;

// Database-specific modules (conditional based on features)
#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
