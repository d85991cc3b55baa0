use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Difficulty level of a learning content
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// An exercise embedded in a learning content
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Exercise {
    /// Unique identifier within the parent content
    pub id: Uuid,
    /// The task presented to the learner
    pub prompt: String,
    /// Reference solution
    pub solution: String,
    /// Progressive hints, in the order they should be revealed
    pub hints: Vec<String>,
}

/// Learning content entity - represents a document stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LearningContent {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Content title
    pub title: String,
    /// Short description shown in listings
    pub description: String,
    /// Main body (markdown)
    pub body: String,
    /// Tags for organization and search
    pub tags: Vec<String>,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Embedded exercises
    pub exercises: Vec<Exercise>,
    /// Collections this content belongs to (back-references)
    #[serde(default)]
    pub collection_ids: Vec<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for an exercise inside create/update requests
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateExercise {
    #[validate(length(min = 1, max = 2000))]
    pub prompt: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub hints: Vec<String>,
}

/// DTO for creating a new learning content
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateContent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<CreateExercise>,
}

/// DTO for updating an existing learning content
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateContent {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<Difficulty>,
    #[validate(nested)]
    pub exercises: Option<Vec<CreateExercise>>,
}

/// Query filters for listing contents
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ContentFilter {
    /// Filter by difficulty
    pub difficulty: Option<Difficulty>,
    /// Filter by tag (contents containing this tag)
    pub tag: Option<String>,
    /// Filter by collection membership
    pub collection_id: Option<Uuid>,
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

impl Exercise {
    fn from_input(input: CreateExercise) -> Self {
        Self {
            id: Uuid::now_v7(),
            prompt: input.prompt,
            solution: input.solution,
            hints: input.hints,
        }
    }
}

impl LearningContent {
    /// Create a new content from CreateContent DTO
    pub fn new(input: CreateContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            body: input.body,
            tags: input.tags,
            difficulty: input.difficulty,
            exercises: input
                .exercises
                .into_iter()
                .map(Exercise::from_input)
                .collect(),
            collection_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateContent DTO
    pub fn apply_update(&mut self, update: UpdateContent) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(difficulty) = update.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(exercises) = update.exercises {
            self.exercises = exercises.into_iter().map(Exercise::from_input).collect();
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(title: &str) -> CreateContent {
        CreateContent {
            title: title.to_string(),
            description: "desc".to_string(),
            body: String::new(),
            tags: vec!["rust".to_string()],
            difficulty: Difficulty::Intermediate,
            exercises: vec![CreateExercise {
                prompt: "Implement a linked list".to_string(),
                solution: String::new(),
                hints: vec![],
            }],
        }
    }

    #[test]
    fn test_new_content_assigns_ids_and_timestamps() {
        let content = LearningContent::new(create_input("Ownership"));
        assert_eq!(content.title, "Ownership");
        assert_eq!(content.exercises.len(), 1);
        assert!(content.collection_ids.is_empty());
        assert_eq!(content.created_at, content.updated_at);
    }

    #[test]
    fn test_apply_update_replaces_only_provided_fields() {
        let mut content = LearningContent::new(create_input("Ownership"));
        let created = content.created_at;

        content.apply_update(UpdateContent {
            description: Some("updated".to_string()),
            ..Default::default()
        });

        assert_eq!(content.title, "Ownership");
        assert_eq!(content.description, "updated");
        assert_eq!(content.created_at, created);
        assert!(content.updated_at >= created);
    }

    #[test]
    fn test_apply_update_replaces_exercises_wholesale() {
        let mut content = LearningContent::new(create_input("Ownership"));
        let original_exercise_id = content.exercises[0].id;

        content.apply_update(UpdateContent {
            exercises: Some(vec![CreateExercise {
                prompt: "Explain borrowing".to_string(),
                solution: String::new(),
                hints: vec!["think lifetimes".to_string()],
            }]),
            ..Default::default()
        });

        assert_eq!(content.exercises.len(), 1);
        assert_ne!(content.exercises[0].id, original_exercise_id);
        assert_eq!(content.exercises[0].prompt, "Explain borrowing");
    }

    #[test]
    fn test_difficulty_serializes_snake_case() {
        assert_eq!(Difficulty::Beginner.to_string(), "beginner");
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            "\"intermediate\""
        );
    }
}
