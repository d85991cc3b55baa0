//! MongoDB implementation of ContentRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ContentError, ContentResult};
use crate::models::{ContentFilter, CreateContent, LearningContent, UpdateContent};
use crate::repository::ContentRepository;

const CONTENTS: &str = "learning_contents";
const COLLECTIONS: &str = "learning_collections";

/// MongoDB implementation of the ContentRepository
pub struct MongoContentRepository {
    db: Database,
    collection: Collection<LearningContent>,
}

impl MongoContentRepository {
    /// Create a new MongoContentRepository
    ///
    /// # Arguments
    /// * `db` - MongoDB database instance
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<LearningContent>(CONTENTS);
        Self { db, collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<LearningContent> {
        &self.collection
    }

    /// Create the indexes this repository queries against
    pub async fn create_indexes(&self) -> ContentResult<()> {
        self.collection
            .create_index(IndexModel::builder().keys(doc! { "tags": 1 }).build())
            .await?;
        self.collection
            .create_index(IndexModel::builder().keys(doc! { "title": 1 }).build())
            .await?;
        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "collection_ids": 1 })
                    .build(),
            )
            .await?;
        Ok(())
    }

    fn id_filter(id: Uuid) -> mongodb::bson::Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Build a MongoDB filter document from ContentFilter
    fn build_filter(filter: &ContentFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(ref difficulty) = filter.difficulty {
            doc.insert("difficulty", difficulty.to_string());
        }

        if let Some(ref tag) = filter.tag {
            doc.insert("tags", doc! { "$in": [tag] });
        }

        if let Some(ref collection_id) = filter.collection_id {
            doc.insert(
                "collection_ids",
                to_bson(collection_id).unwrap_or(Bson::Null),
            );
        }

        if let Some(ref search) = filter.search {
            doc.insert(
                "$or",
                vec![
                    doc! { "title": { "$regex": search, "$options": "i" } },
                    doc! { "description": { "$regex": search, "$options": "i" } },
                ],
            );
        }

        doc
    }
}

#[async_trait]
impl ContentRepository for MongoContentRepository {
    #[instrument(skip(self, input), fields(content_title = %input.title))]
    async fn create(&self, input: CreateContent) -> ContentResult<LearningContent> {
        let content = LearningContent::new(input);

        self.collection.insert_one(&content).await?;

        tracing::info!(content_id = %content.id, "Content created successfully");
        Ok(content)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ContentResult<Option<LearningContent>> {
        let content = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(content)
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    async fn get_many(&self, ids: Vec<Uuid>) -> ContentResult<Vec<LearningContent>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_values: Vec<Bson> = ids
            .iter()
            .map(|id| to_bson(id).unwrap_or(Bson::Null))
            .collect();

        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": id_values } })
            .await?;
        let contents: Vec<LearningContent> = cursor.try_collect().await?;

        Ok(contents)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ContentFilter) -> ContentResult<Vec<LearningContent>> {
        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let contents: Vec<LearningContent> = cursor.try_collect().await?;

        Ok(contents)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> ContentResult<Vec<LearningContent>> {
        let cursor = self.collection.find(doc! {}).await?;
        let contents: Vec<LearningContent> = cursor.try_collect().await?;
        Ok(contents)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateContent) -> ContentResult<LearningContent> {
        let filter = Self::id_filter(id);
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ContentError::NotFound(id))?;

        let mut updated = existing;
        updated.apply_update(input);

        self.collection.replace_one(filter, &updated).await?;

        tracing::info!(content_id = %id, "Content updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ContentResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(ContentError::NotFound(id));
        }

        // Keep membership bookkeeping consistent: drop the content from every
        // collection that referenced it.
        let id_value = to_bson(&id).unwrap_or(Bson::Null);
        self.db
            .collection::<mongodb::bson::Document>(COLLECTIONS)
            .update_many(
                doc! { "content_ids": id_value.clone() },
                doc! { "$pull": { "content_ids": id_value } },
            )
            .await?;

        tracing::info!(content_id = %id, "Content deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ContentFilter) -> ContentResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn exists_by_title(&self, title: &str) -> ContentResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "title": title })
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn test_build_filter_empty() {
        let filter = ContentFilter::default();
        let doc = MongoContentRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_difficulty() {
        let filter = ContentFilter {
            difficulty: Some(Difficulty::Advanced),
            ..Default::default()
        };
        let doc = MongoContentRepository::build_filter(&filter);
        assert_eq!(doc.get_str("difficulty").unwrap(), "advanced");
    }

    #[test]
    fn test_build_filter_with_tag() {
        let filter = ContentFilter {
            tag: Some("rust".to_string()),
            ..Default::default()
        };
        let doc = MongoContentRepository::build_filter(&filter);
        assert!(doc.contains_key("tags"));
    }

    #[test]
    fn test_build_filter_with_search() {
        let filter = ContentFilter {
            search: Some("ownership".to_string()),
            ..Default::default()
        };
        let doc = MongoContentRepository::build_filter(&filter);
        assert!(doc.contains_key("$or"));
    }

    #[test]
    fn test_build_filter_with_collection_membership() {
        let filter = ContentFilter {
            collection_id: Some(Uuid::now_v7()),
            ..Default::default()
        };
        let doc = MongoContentRepository::build_filter(&filter);
        assert!(doc.contains_key("collection_ids"));
    }
}
