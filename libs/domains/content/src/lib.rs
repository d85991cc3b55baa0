//! Learning Content Domain
//!
//! This module provides a complete domain implementation for managing learning
//! content using MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌────────────────┐
//! │   Service   │─────▶│ ContentIndexer │  ← optional search-index integration
//! └──────┬──────┘      │    (trait)     │
//!        │             └────────────────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_content::{handlers, ContentService, MongoContentRepository};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("learning");
//!
//! let repository = MongoContentRepository::new(db);
//! let service = ContentService::new(repository);
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
pub use error::{ContentError, ContentResult};
pub use handlers::ApiDoc;
pub use indexer::ContentIndexer;
pub use models::{
    ContentFilter, CreateContent, CreateExercise, Difficulty, Exercise, LearningContent,
    UpdateContent,
};
pub use mongodb::MongoContentRepository;
pub use repository::ContentRepository;
pub use service::ContentService;
