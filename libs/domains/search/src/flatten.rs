//! Deterministic document-to-text flattening and index point-id derivation.
//!
//! Documents and queries are flattened with the same rules so their embeddings
//! live in the same space. The flattened form is a pure function of the
//! document's semantic fields: equal documents flatten to byte-equal strings,
//! and tag order never changes the result.

use domain_collections::LearningCollection;
use domain_content::LearningContent;
use uuid::Uuid;

/// Namespace for deriving index point ids from document ids.
///
/// Fixed forever: changing it would orphan every point already stored in the
/// index.
pub const POINT_NAMESPACE: Uuid = Uuid::from_bytes([
    0xa2, 0xb7, 0xf6, 0x0e, 0x3f, 0x54, 0x4d, 0x8e, 0x9c, 0x26, 0x5b, 0x6f, 0x3a, 0x1d, 0x4e, 0x8b,
]);

/// Derive the vector-index point id for a document.
///
/// UUIDv5 over the document id, so re-embedding a document overwrites its
/// existing point and deletions address the right point.
pub fn point_id(document_id: Uuid) -> Uuid {
    Uuid::new_v5(&POINT_NAMESPACE, document_id.as_bytes())
}

/// Flatten a learning content into its canonical embedding text.
///
/// Included fields, in order: title, description, tags, exercise prompts.
/// The body is intentionally excluded: sentence-transformer models truncate
/// long inputs, and title/description/tags carry the retrieval signal.
pub fn flatten_content(content: &LearningContent) -> String {
    let mut segments: Vec<String> = Vec::new();

    push_non_empty(&mut segments, &content.title);
    push_non_empty(&mut segments, &content.description);
    if let Some(tags) = tag_line(&content.tags) {
        segments.push(tags);
    }
    for exercise in &content.exercises {
        push_non_empty(&mut segments, &exercise.prompt);
    }

    segments.join("\n")
}

/// Flatten a collection into its canonical embedding text.
pub fn flatten_collection(collection: &LearningCollection) -> String {
    let mut segments: Vec<String> = Vec::new();

    push_non_empty(&mut segments, &collection.title);
    push_non_empty(&mut segments, &collection.description);
    if let Some(tags) = tag_line(&collection.tags) {
        segments.push(tags);
    }

    segments.join("\n")
}

/// Flatten a free-text query plus optional tag filters.
///
/// Uses the same tag rule as document flattening so query and document
/// embeddings agree on how tags are expressed.
pub fn flatten_query(query: &str, tags: &[String]) -> String {
    let mut segments: Vec<String> = Vec::new();

    push_non_empty(&mut segments, query);
    if let Some(tags) = tag_line(tags) {
        segments.push(tags);
    }

    segments.join("\n")
}

fn push_non_empty(segments: &mut Vec<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}

/// Canonical tag segment: trimmed, deduplicated, sorted.
fn tag_line(tags: &[String]) -> Option<String> {
    let mut cleaned: Vec<&str> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.sort_unstable();
    cleaned.dedup();

    Some(format!("tags: {}", cleaned.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_content::{CreateContent, CreateExercise, Difficulty};

    fn content(title: &str, description: &str, tags: &[&str], prompts: &[&str]) -> LearningContent {
        LearningContent::new(CreateContent {
            title: title.to_string(),
            description: description.to_string(),
            body: "long body text that must not appear".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            difficulty: Difficulty::Beginner,
            exercises: prompts
                .iter()
                .map(|p| CreateExercise {
                    prompt: p.to_string(),
                    solution: "secret".to_string(),
                    hints: vec!["hint".to_string()],
                })
                .collect(),
        })
    }

    #[test]
    fn test_flatten_content_field_order() {
        let content = content(
            "Ownership",
            "Learn the borrow checker",
            &["rust", "memory"],
            &["Fix the borrow error"],
        );

        assert_eq!(
            flatten_content(&content),
            "Ownership\nLearn the borrow checker\ntags: memory, rust\nFix the borrow error"
        );
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let content = content("Ownership", "Learn the borrow checker", &["rust"], &[]);
        assert_eq!(flatten_content(&content), flatten_content(&content));
    }

    #[test]
    fn test_flatten_tag_order_is_irrelevant() {
        let a = content("T", "D", &["zebra", "alpha"], &[]);
        let b = content("T", "D", &["alpha", "zebra"], &[]);
        assert_eq!(flatten_content(&a), flatten_content(&b));
    }

    #[test]
    fn test_flatten_dedups_and_trims_tags() {
        let content = content("T", "D", &[" rust ", "rust", "", "  "], &[]);
        assert_eq!(flatten_content(&content), "T\nD\ntags: rust");
    }

    #[test]
    fn test_flatten_skips_empty_fields() {
        let content = content("Only Title", "", &[], &[]);
        assert_eq!(flatten_content(&content), "Only Title");
    }

    #[test]
    fn test_flatten_excludes_body_solutions_and_hints() {
        let content = content("T", "", &[], &["Prompt"]);
        let flat = flatten_content(&content);
        assert!(!flat.contains("long body text"));
        assert!(!flat.contains("secret"));
        assert!(!flat.contains("hint"));
        assert!(flat.contains("Prompt"));
    }

    #[test]
    fn test_flatten_query_matches_document_tag_rule() {
        let flat = flatten_query("borrow checker", &["rust".to_string(), "memory".to_string()]);
        assert_eq!(flat, "borrow checker\ntags: memory, rust");
    }

    #[test]
    fn test_flatten_query_without_tags() {
        assert_eq!(flatten_query("  borrow checker  ", &[]), "borrow checker");
    }

    #[test]
    fn test_point_id_is_stable_and_distinct() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();

        assert_eq!(point_id(a), point_id(a));
        assert_ne!(point_id(a), point_id(b));
        assert_ne!(point_id(a), a);
    }
}
