//! Member service for managing address-book entries.

use std::sync::Arc;

use adressbook_database::{
    parse_member_id, CreateMemberRequest, DatabaseConnection, Member, MemberFilter,
    MemberRepository, UpdateMemberRequest,
};
use tracing::{debug, info};

use crate::types::MemberResult;

/// Service for member operations.
///
/// Holds nothing but the repository binding, so any number of instances can
/// work on the same collection.
#[derive(Clone)]
pub struct MemberService {
    repository: Arc<dyn MemberRepository>,
}

impl MemberService {
    /// Create a service bound to the member collection of `connection`
    pub fn new(connection: &DatabaseConnection) -> Self {
        Self::with_repository(Arc::new(connection.members()))
    }

    /// Create a service on top of any member repository
    pub fn with_repository(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    /// Find members whose fields equal every value set in `filter`.
    ///
    /// Results are ordered by first name, then last name. The whole result set
    /// is loaded into memory; there is no paging.
    pub async fn search(&self, filter: &MemberFilter) -> MemberResult<Vec<Member>> {
        let members = self.repository.find(filter).await?;
        debug!(?filter, found = members.len(), "searched members");
        Ok(members)
    }

    /// Store a new member. Fields missing from `request` are stored as empty strings.
    pub async fn create(&self, request: CreateMemberRequest) -> MemberResult<Member> {
        let member = self.repository.insert(&request.into_new_member()).await?;
        info!(member_id = %member.id, "created member");
        Ok(member)
    }

    /// Get a member by id, `None` if it does not exist
    pub async fn read(&self, id: &str) -> MemberResult<Option<Member>> {
        let id = parse_member_id(id)?;
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Overwrite the non-empty fields of `request` on an existing member.
    ///
    /// Empty or missing values keep the stored value. Returns the member after
    /// the update, or `None` if no member has this id.
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateMemberRequest,
    ) -> MemberResult<Option<Member>> {
        let id = parse_member_id(id)?;
        let changes = request.changes();

        let updated = self.repository.update_fields(id, &changes).await?;
        if updated.is_some() && !changes.is_empty() {
            info!(member_id = %id, "updated member");
        }
        Ok(updated)
    }

    /// Remove a member, returning how many were deleted (0 or 1)
    pub async fn delete(&self, id: &str) -> MemberResult<u64> {
        let id = parse_member_id(id)?;
        let deleted = self.repository.delete_by_id(id).await?;
        if deleted > 0 {
            info!(member_id = %id, "deleted member");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adressbook_database::{seed_demo_data, InMemoryMemberRepository};

    async fn seeded_service() -> MemberService {
        let repository = InMemoryMemberRepository::new();
        seed_demo_data(&repository).await.unwrap();
        MemberService::with_repository(Arc::new(repository))
    }

    fn create_request(first_name: &str, last_name: &str, member_number: &str) -> CreateMemberRequest {
        CreateMemberRequest {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            member_number: Some(member_number.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_then_read_returns_same_record() {
        let service = seeded_service().await;

        let created = service
            .create(create_request("Jake", "Blues", "7339"))
            .await
            .unwrap();
        let read = service.read(&created.id.to_hex()).await.unwrap();

        assert_eq!(read, Some(created));
    }

    #[tokio::test]
    async fn test_create_without_fields_stores_empty_strings() {
        let service = seeded_service().await;

        let created = service.create(CreateMemberRequest::default()).await.unwrap();

        assert_eq!(created.first_name, "");
        assert_eq!(created.last_name, "");
        assert_eq!(created.member_number, "");
        let others = service.search(&MemberFilter::default()).await.unwrap();
        assert_eq!(others.iter().filter(|m| m.id == created.id).count(), 1);
    }

    #[tokio::test]
    async fn test_update_with_empty_request_is_a_noop() {
        let service = seeded_service().await;
        let created = service
            .create(create_request("Jake", "Blues", "7339"))
            .await
            .unwrap();

        let blank = UpdateMemberRequest {
            first_name: Some(String::new()),
            last_name: Some(String::new()),
            member_number: Some(String::new()),
        };
        let id = created.id.to_hex();

        let untouched = service
            .update(&id, &UpdateMemberRequest::default())
            .await
            .unwrap();
        assert_eq!(untouched, Some(created.clone()));
        assert_eq!(service.update(&id, &blank).await.unwrap(), Some(created.clone()));
        assert_eq!(service.read(&id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_update_changes_only_given_field() {
        let service = seeded_service().await;
        let created = service
            .create(create_request("Jake", "Blues", "7339"))
            .await
            .unwrap();

        let request = UpdateMemberRequest {
            first_name: Some("X".to_string()),
            ..Default::default()
        };
        let updated = service
            .update(&created.id.to_hex(), &request)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "X");
        assert_eq!(updated.last_name, "Blues");
        assert_eq!(updated.member_number, "7339");
    }

    #[tokio::test]
    async fn test_update_missing_member_returns_none() {
        let service = seeded_service().await;
        let request = UpdateMemberRequest {
            first_name: Some("X".to_string()),
            ..Default::default()
        };

        let missing = adressbook_database::ObjectId::new().to_hex();
        assert!(service.update(&missing, &request).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_then_read_is_absent() {
        let service = seeded_service().await;
        let created = service
            .create(create_request("Jake", "Blues", "7339"))
            .await
            .unwrap();
        let id = created.id.to_hex();

        assert_eq!(service.delete(&id).await.unwrap(), 1);
        assert!(service.read(&id).await.unwrap().is_none());
        assert_eq!(service.delete(&id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_ids_are_rejected() {
        let service = seeded_service().await;

        assert!(service.read("42").await.unwrap_err().is_invalid_id());
        assert!(service
            .update("42", &UpdateMemberRequest::default())
            .await
            .unwrap_err()
            .is_invalid_id());
        assert!(service.delete("42").await.unwrap_err().is_invalid_id());
    }
}
