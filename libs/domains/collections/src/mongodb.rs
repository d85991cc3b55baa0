//! MongoDB implementation of CollectionRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CollectionError, CollectionResult};
use crate::models::{CollectionFilter, CreateCollection, LearningCollection, UpdateCollection};
use crate::repository::CollectionRepository;

const COLLECTIONS: &str = "learning_collections";
const CONTENTS: &str = "learning_contents";

/// MongoDB implementation of the CollectionRepository
///
/// Holds the database handle rather than a single typed collection because
/// membership mutations touch both `learning_collections` and
/// `learning_contents`.
pub struct MongoCollectionRepository {
    db: Database,
    collection: Collection<LearningCollection>,
}

impl MongoCollectionRepository {
    /// Create a new MongoCollectionRepository
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<LearningCollection>(COLLECTIONS);
        Self { db, collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<LearningCollection> {
        &self.collection
    }

    /// Create the indexes this repository queries against
    pub async fn create_indexes(&self) -> CollectionResult<()> {
        self.collection
            .create_index(IndexModel::builder().keys(doc! { "tags": 1 }).build())
            .await?;
        self.collection
            .create_index(IndexModel::builder().keys(doc! { "content_ids": 1 }).build())
            .await?;
        Ok(())
    }

    fn contents(&self) -> Collection<Document> {
        self.db.collection::<Document>(CONTENTS)
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Build a MongoDB filter document from CollectionFilter
    fn build_filter(filter: &CollectionFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref tag) = filter.tag {
            doc.insert("tags", doc! { "$in": [tag] });
        }

        if let Some(ref content_id) = filter.content_id {
            doc.insert("content_ids", to_bson(content_id).unwrap_or(Bson::Null));
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

    async fn require_content_exists(&self, content_id: Uuid) -> CollectionResult<()> {
        let count = self
            .contents()
            .count_documents(Self::id_filter(content_id))
            .await?;
        if count == 0 {
            return Err(CollectionError::ContentNotFound(content_id));
        }
        Ok(())
    }

    async fn require_collection(&self, id: Uuid) -> CollectionResult<LearningCollection> {
        self.collection
            .find_one(Self::id_filter(id))
            .await?
            .ok_or(CollectionError::NotFound(id))
    }
}

#[async_trait]
impl CollectionRepository for MongoCollectionRepository {
    #[instrument(skip(self, input), fields(collection_title = %input.title))]
    async fn create(&self, input: CreateCollection) -> CollectionResult<LearningCollection> {
        let collection = LearningCollection::new(input);

        self.collection.insert_one(&collection).await?;

        tracing::info!(collection_id = %collection.id, "Collection created successfully");
        Ok(collection)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CollectionResult<Option<LearningCollection>> {
        let collection = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(collection)
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    async fn get_many(&self, ids: Vec<Uuid>) -> CollectionResult<Vec<LearningCollection>> {
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
        let collections: Vec<LearningCollection> = cursor.try_collect().await?;

        Ok(collections)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: CollectionFilter) -> CollectionResult<Vec<LearningCollection>> {
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
        let collections: Vec<LearningCollection> = cursor.try_collect().await?;

        Ok(collections)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> CollectionResult<Vec<LearningCollection>> {
        let cursor = self.collection.find(doc! {}).await?;
        let collections: Vec<LearningCollection> = cursor.try_collect().await?;
        Ok(collections)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: Uuid,
        input: UpdateCollection,
    ) -> CollectionResult<LearningCollection> {
        let mut updated = self.require_collection(id).await?;
        updated.apply_update(input);

        self.collection
            .replace_one(Self::id_filter(id), &updated)
            .await?;

        tracing::info!(collection_id = %id, "Collection updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CollectionResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(CollectionError::NotFound(id));
        }

        // Clear back-references on every member content
        let id_value = to_bson(&id).unwrap_or(Bson::Null);
        self.contents()
            .update_many(
                doc! { "collection_ids": id_value.clone() },
                doc! { "$pull": { "collection_ids": id_value } },
            )
            .await?;

        tracing::info!(collection_id = %id, "Collection deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: CollectionFilter) -> CollectionResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn exists_by_title(&self, title: &str) -> CollectionResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "title": title })
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn add_content(
        &self,
        id: Uuid,
        content_id: Uuid,
    ) -> CollectionResult<LearningCollection> {
        self.require_collection(id).await?;
        self.require_content_exists(content_id).await?;

        let collection_value = to_bson(&id).unwrap_or(Bson::Null);
        let content_value = to_bson(&content_id).unwrap_or(Bson::Null);

        // Both sides of the membership, $addToSet keeps the operation idempotent
        self.collection
            .update_one(
                Self::id_filter(id),
                doc! { "$addToSet": { "content_ids": content_value.clone() } },
            )
            .await?;
        self.contents()
            .update_one(
                Self::id_filter(content_id),
                doc! { "$addToSet": { "collection_ids": collection_value } },
            )
            .await?;

        tracing::info!(collection_id = %id, content_id = %content_id, "Content added to collection");
        self.require_collection(id).await
    }

    #[instrument(skip(self))]
    async fn remove_content(
        &self,
        id: Uuid,
        content_id: Uuid,
    ) -> CollectionResult<LearningCollection> {
        self.require_collection(id).await?;

        let collection_value = to_bson(&id).unwrap_or(Bson::Null);
        let content_value = to_bson(&content_id).unwrap_or(Bson::Null);

        self.collection
            .update_one(
                Self::id_filter(id),
                doc! { "$pull": { "content_ids": content_value } },
            )
            .await?;
        self.contents()
            .update_one(
                Self::id_filter(content_id),
                doc! { "$pull": { "collection_ids": collection_value } },
            )
            .await?;

        tracing::info!(collection_id = %id, content_id = %content_id, "Content removed from collection");
        self.require_collection(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let filter = CollectionFilter::default();
        let doc = MongoCollectionRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_tag() {
        let filter = CollectionFilter {
            tag: Some("rust".to_string()),
            ..Default::default()
        };
        let doc = MongoCollectionRepository::build_filter(&filter);
        assert!(doc.contains_key("tags"));
    }

    #[test]
    fn test_build_filter_with_content_membership() {
        let filter = CollectionFilter {
            content_id: Some(Uuid::now_v7()),
            ..Default::default()
        };
        let doc = MongoCollectionRepository::build_filter(&filter);
        assert!(doc.contains_key("content_ids"));
    }

    #[test]
    fn test_build_filter_with_search() {
        let filter = CollectionFilter {
            search: Some("rust".to_string()),
            ..Default::default()
        };
        let doc = MongoCollectionRepository::build_filter(&filter);
        assert!(doc.contains_key("$or"));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_membership_stays_two_way() {
        use crate::repository::CollectionRepository;
        use domain_content::{ContentRepository, CreateContent, MongoContentRepository};

        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let db = client.database("learning_it");

        let contents = MongoContentRepository::new(db.clone());
        let collections = MongoCollectionRepository::new(db.clone());

        let content = contents
            .create(CreateContent {
                title: format!("membership {}", Uuid::now_v7()),
                description: String::new(),
                body: String::new(),
                tags: vec![],
                difficulty: Default::default(),
                exercises: vec![],
            })
            .await
            .unwrap();
        let collection = collections
            .create(CreateCollection {
                title: format!("membership {}", Uuid::now_v7()),
                description: String::new(),
                tags: vec![],
            })
            .await
            .unwrap();

        // Add: both sides reference each other
        let updated = collections
            .add_content(collection.id, content.id)
            .await
            .unwrap();
        assert!(updated.content_ids.contains(&content.id));
        let content_after = contents.get_by_id(content.id).await.unwrap().unwrap();
        assert!(content_after.collection_ids.contains(&collection.id));

        // Delete the collection: back-reference disappears
        collections.delete(collection.id).await.unwrap();
        let content_after = contents.get_by_id(content.id).await.unwrap().unwrap();
        assert!(!content_after.collection_ids.contains(&collection.id));

        contents.delete(content.id).await.unwrap();
    }
}
