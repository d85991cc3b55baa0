//! Learning Collections Domain
//!
//! This module provides a complete domain implementation for managing
//! collections of learning contents using MongoDB.
//!
//! A collection and its contents reference each other: the collection document
//! holds `content_ids`, each content document holds `collection_ids`. The
//! repository keeps both sides in sync on add/remove/delete.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_collections::{handlers, CollectionService, MongoCollectionRepository};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("learning");
//!
//! let repository = MongoCollectionRepository::new(db);
//! let service = CollectionService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod indexer;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CollectionError, CollectionResult};
pub use handlers::ApiDoc;
pub use indexer::CollectionIndexer;
pub use models::{CollectionFilter, CreateCollection, LearningCollection, UpdateCollection};
pub use mongodb::MongoCollectionRepository;
pub use repository::CollectionRepository;
pub use service::CollectionService;
