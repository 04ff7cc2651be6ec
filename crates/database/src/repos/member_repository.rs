//! Repository for member data access operations.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::debug;

use crate::entities::{Member, MemberChanges, MemberFilter, NewMember, COLLECTION_NAME};
use crate::types::{DatabaseError, DatabaseResult};

/// Storage operations on the member collection.
///
/// Implementations return `Ok(None)` / `Ok(0)` for ids that do not exist and
/// reserve `Err` for failures of the store itself.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// All members matching `filter`, ordered by first name then last name
    async fn find(&self, filter: &MemberFilter) -> DatabaseResult<Vec<Member>>;

    async fn find_by_id(&self, id: ObjectId) -> DatabaseResult<Option<Member>>;

    /// Insert one member and return it with the id assigned by the store
    async fn insert(&self, member: &NewMember) -> DatabaseResult<Member>;

    /// Insert a batch of members, returning how many were written
    async fn insert_many(&self, members: &[NewMember]) -> DatabaseResult<usize>;

    /// Overwrite the given fields and return the member after the update
    async fn update_fields(
        &self,
        id: ObjectId,
        changes: &MemberChanges,
    ) -> DatabaseResult<Option<Member>>;

    async fn delete_by_id(&self, id: ObjectId) -> DatabaseResult<u64>;

    async fn count(&self) -> DatabaseResult<u64>;
}

/// Member repository backed by a MongoDB collection
#[derive(Clone, Debug)]
pub struct MongoMemberRepository {
    collection: Collection<Member>,
}

impl MongoMemberRepository {
    /// Bind to the member collection of `database`
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }
}

fn filter_document(filter: &MemberFilter) -> Document {
    filter
        .fields()
        .map(|(field, value)| (field.to_string(), Bson::from(value)))
        .collect()
}

fn set_document(changes: &MemberChanges) -> Document {
    changes
        .fields()
        .map(|(field, value)| (field.to_string(), Bson::from(value)))
        .collect()
}

#[async_trait]
impl MemberRepository for MongoMemberRepository {
    async fn find(&self, filter: &MemberFilter) -> DatabaseResult<Vec<Member>> {
        let query = filter_document(filter);
        debug!(?query, "searching members");

        let cursor = self
            .collection
            .find(query)
            .sort(doc! { "first_name": 1, "last_name": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: ObjectId) -> DatabaseResult<Option<Member>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, member: &NewMember) -> DatabaseResult<Member> {
        let result = self
            .collection
            .clone_with_type::<NewMember>()
            .insert_one(member)
            .await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| DatabaseError::UnexpectedId(result.inserted_id.to_string()))?;

        Ok(member.clone().into_member(id))
    }

    async fn insert_many(&self, members: &[NewMember]) -> DatabaseResult<usize> {
        if members.is_empty() {
            return Ok(0);
        }

        let result = self
            .collection
            .clone_with_type::<NewMember>()
            .insert_many(members)
            .await?;

        Ok(result.inserted_ids.len())
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        changes: &MemberChanges,
    ) -> DatabaseResult<Option<Member>> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set_document(changes) })
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_by_id(&self, id: ObjectId) -> DatabaseResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn count(&self) -> DatabaseResult<u64> {
        Ok(self.collection.estimated_document_count().await?)
    }
}
