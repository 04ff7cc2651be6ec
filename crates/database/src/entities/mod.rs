//! Domain entities for the database layer

pub mod member;

pub use member::{
    parse_member_id, CreateMemberRequest, Member, MemberChanges, MemberFilter, NewMember,
    UpdateMemberRequest, COLLECTION_NAME,
};
