//! In-memory member repository, used as a substitute store in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::MemberRepository;
use crate::entities::{Member, MemberChanges, MemberFilter, NewMember};
use crate::types::DatabaseResult;

/// Member repository keeping documents in a shared map
#[derive(Clone, Default)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<HashMap<ObjectId, Member>>>,
}

impl InMemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find(&self, filter: &MemberFilter) -> DatabaseResult<Vec<Member>> {
        let members = self.members.read().await;
        let mut found: Vec<Member> = members
            .values()
            .filter(|member| filter.matches(member))
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            a.first_name
                .cmp(&b.first_name)
                .then_with(|| a.last_name.cmp(&b.last_name))
        });
        Ok(found)
    }

    async fn find_by_id(&self, id: ObjectId) -> DatabaseResult<Option<Member>> {
        let members = self.members.read().await;
        Ok(members.get(&id).cloned())
    }

    async fn insert(&self, member: &NewMember) -> DatabaseResult<Member> {
        let stored = member.clone().into_member(ObjectId::new());
        let mut members = self.members.write().await;
        members.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn insert_many(&self, new_members: &[NewMember]) -> DatabaseResult<usize> {
        let mut members = self.members.write().await;
        for member in new_members {
            let stored = member.clone().into_member(ObjectId::new());
            members.insert(stored.id, stored);
        }
        Ok(new_members.len())
    }

    async fn update_fields(
        &self,
        id: ObjectId,
        changes: &MemberChanges,
    ) -> DatabaseResult<Option<Member>> {
        let mut members = self.members.write().await;
        Ok(members.get_mut(&id).map(|member| {
            changes.apply(member);
            member.clone()
        }))
    }

    async fn delete_by_id(&self, id: ObjectId) -> DatabaseResult<u64> {
        let mut members = self.members.write().await;
        Ok(u64::from(members.remove(&id).is_some()))
    }

    async fn count(&self) -> DatabaseResult<u64> {
        let members = self.members.read().await;
        Ok(members.len() as u64)
    }
}
