//! Member entity definitions

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::types::{DatabaseError, DatabaseResult};

/// Name of the collection holding member records
pub const COLLECTION_NAME: &str = "teilnehmer";

/// A stored address-book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub member_number: String,
}

/// Member document before the store has assigned an id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub member_number: String,
}

impl NewMember {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        member_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            member_number: member_number.into(),
        }
    }

    /// Attach the id assigned by the store
    pub fn into_member(self, id: ObjectId) -> Member {
        Member {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            member_number: self.member_number,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub member_number: Option<String>,
}

impl CreateMemberRequest {
    /// Document to insert, with missing fields stored as empty strings
    pub fn into_new_member(self) -> NewMember {
        NewMember {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            member_number: self.member_number.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub member_number: Option<String>,
}

impl UpdateMemberRequest {
    /// Fields that will actually be written.
    ///
    /// Empty strings count as absent, so an update can never clear a field.
    pub fn changes(&self) -> MemberChanges {
        fn non_empty(value: &Option<String>) -> Option<String> {
            value.as_ref().filter(|v| !v.is_empty()).cloned()
        }

        MemberChanges {
            first_name: non_empty(&self.first_name),
            last_name: non_empty(&self.last_name),
            member_number: non_empty(&self.member_number),
        }
    }
}

/// Non-empty field values to overwrite on an existing member
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub member_number: Option<String>,
}

impl MemberChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.member_number.is_none()
    }

    /// Field name and new value for every change, in document field order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("member_number", self.member_number.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }

    pub fn apply(&self, member: &mut Member) {
        if let Some(first_name) = &self.first_name {
            member.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            member.last_name = last_name.clone();
        }
        if let Some(member_number) = &self.member_number {
            member.member_number = member_number.clone();
        }
    }
}

/// Exact-match search filter. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFilter {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub member_number: Option<String>,
}

impl MemberFilter {
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_member_number(mut self, member_number: impl Into<String>) -> Self {
        self.member_number = Some(member_number.into());
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("member_number", self.member_number.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }

    pub fn matches(&self, member: &Member) -> bool {
        self.fields().all(|(field, value)| match field {
            "first_name" => member.first_name == value,
            "last_name" => member.last_name == value,
            _ => member.member_number == value,
        })
    }
}

/// Convert a caller-supplied id string into the store's id type
pub fn parse_member_id(id: &str) -> DatabaseResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|source| DatabaseError::InvalidId {
        id: id.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(first_name: &str, last_name: &str, member_number: &str) -> Member {
        NewMember::new(first_name, last_name, member_number).into_member(ObjectId::new())
    }

    #[test]
    fn create_request_defaults_missing_fields_to_empty() {
        let new_member = CreateMemberRequest {
            first_name: Some("Dana".to_string()),
            ..Default::default()
        }
        .into_new_member();

        assert_eq!(new_member, NewMember::new("Dana", "", ""));
    }

    #[test]
    fn update_changes_skip_empty_values() {
        let request = UpdateMemberRequest {
            first_name: Some(String::new()),
            last_name: Some("Scully".to_string()),
            member_number: None,
        };

        let changes = request.changes();
        assert_eq!(changes.last_name.as_deref(), Some("Scully"));
        assert!(changes.first_name.is_none());
        assert_eq!(changes.fields().collect::<Vec<_>>(), vec![("last_name", "Scully")]);
        assert!(UpdateMemberRequest::default().changes().is_empty());
    }

    #[test]
    fn changes_apply_only_present_fields() {
        let mut stored = member("Fox", "Mulder", "3181");
        let changes = UpdateMemberRequest {
            member_number: Some("1013".to_string()),
            ..Default::default()
        }
        .changes();

        changes.apply(&mut stored);

        assert_eq!(stored.first_name, "Fox");
        assert_eq!(stored.last_name, "Mulder");
        assert_eq!(stored.member_number, "1013");
    }

    #[test]
    fn filter_matches_every_set_field() {
        let scully = member("Dana", "Scully", "2287");

        assert!(MemberFilter::default().matches(&scully));
        assert!(MemberFilter::default().with_last_name("Scully").matches(&scully));
        assert!(!MemberFilter::default()
            .with_last_name("Scully")
            .with_first_name("Fox")
            .matches(&scully));
        assert!(!MemberFilter::default().with_member_number("").matches(&scully));
    }

    #[test]
    fn parse_member_id_rejects_malformed_input() {
        let id = ObjectId::new();
        assert_eq!(parse_member_id(&id.to_hex()).unwrap(), id);

        let error = parse_member_id("not-an-id").unwrap_err();
        assert!(error.is_invalid_id());
        assert!(error.to_string().contains("not-an-id"));
    }
}
