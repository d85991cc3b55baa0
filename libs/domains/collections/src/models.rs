use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Collection entity - a curated set of learning contents
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LearningCollection {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Collection title
    pub title: String,
    /// Short description shown in listings
    pub description: String,
    /// Tags for organization and search
    pub tags: Vec<String>,
    /// Member contents, in curation order
    #[serde(default)]
    pub content_ids: Vec<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new collection
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCollection {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for updating an existing collection
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCollection {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Query filters for listing collections
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CollectionFilter {
    /// Filter by tag (collections containing this tag)
    pub tag: Option<String>,
    /// Filter by member content
    pub content_id: Option<Uuid>,
    /// Search in title and description
    pub search: Option<String>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    50
}

impl LearningCollection {
    /// Create a new collection from CreateCollection DTO
    pub fn new(input: CreateCollection) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            tags: input.tags,
            content_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateCollection DTO
    pub fn apply_update(&mut self, update: UpdateCollection) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collection_starts_empty() {
        let collection = LearningCollection::new(CreateCollection {
            title: "Rust Basics".to_string(),
            description: String::new(),
            tags: vec!["rust".to_string()],
        });

        assert!(collection.content_ids.is_empty());
        assert_eq!(collection.created_at, collection.updated_at);
    }

    #[test]
    fn test_apply_update_keeps_membership() {
        let mut collection = LearningCollection::new(CreateCollection {
            title: "Rust Basics".to_string(),
            description: String::new(),
            tags: vec![],
        });
        collection.content_ids.push(Uuid::now_v7());

        collection.apply_update(UpdateCollection {
            title: Some("Rust Fundamentals".to_string()),
            ..Default::default()
        });

        assert_eq!(collection.title, "Rust Fundamentals");
        assert_eq!(collection.content_ids.len(), 1);
    }
}
