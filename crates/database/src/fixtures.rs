//! Demo data written into an empty member collection

use tracing::{debug, info};

use crate::entities::NewMember;
use crate::repos::MemberRepository;
use crate::types::DatabaseResult;

/// The five sample members
pub fn demo_members() -> Vec<NewMember> {
    vec![
        NewMember::new("Willy", "Tanner", "4121"),
        NewMember::new("Michael", "Knight", "4194"),
        NewMember::new("Fox", "Mulder", "3181"),
        NewMember::new("Dana", "Scully", "2287"),
        NewMember::new("Elwood", "Blues", "7338"),
    ]
}

/// Insert the demo members if the collection is empty.
///
/// Returns the number of inserted members. The count-then-insert is not
/// atomic; run it once at startup only.
pub async fn seed_demo_data(repository: &dyn MemberRepository) -> DatabaseResult<usize> {
    let existing = repository.count().await?;
    if existing != 0 {
        debug!(existing, "member collection not empty, skipping demo data");
        return Ok(0);
    }

    let inserted = repository.insert_many(&demo_members()).await?;
    info!(inserted, "seeded demo members");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MemberFilter;
    use crate::repos::InMemoryMemberRepository;

    #[tokio::test]
    async fn test_seed_populates_empty_collection() {
        let repo = InMemoryMemberRepository::new();

        assert_eq!(seed_demo_data(&repo).await.unwrap(), 5);

        let members = repo.find(&MemberFilter::default()).await.unwrap();
        let mut stored: Vec<NewMember> = members
            .into_iter()
            .map(|m| NewMember::new(m.first_name, m.last_name, m.member_number))
            .collect();
        let mut expected = demo_members();
        stored.sort_by(|a, b| a.member_number.cmp(&b.member_number));
        expected.sort_by(|a, b| a.member_number.cmp(&b.member_number));
        assert_eq!(stored, expected);
    }

    #[tokio::test]
    async fn test_seed_is_skipped_for_non_empty_collection() {
        let repo = InMemoryMemberRepository::new();
        seed_demo_data(&repo).await.unwrap();

        assert_eq!(seed_demo_data(&repo).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_seed_leaves_existing_members_alone() {
        let repo = InMemoryMemberRepository::new();
        repo.insert(&NewMember::new("Jake", "Blues", "7339")).await.unwrap();

        assert_eq!(seed_demo_data(&repo).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seeded_members_are_listed_by_name() {
        let repo = InMemoryMemberRepository::new();
        seed_demo_data(&repo).await.unwrap();

        let names: Vec<String> = repo
            .find(&MemberFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|m| format!("{} {} {}", m.first_name, m.last_name, m.member_number))
            .collect();
        assert_eq!(
            names,
            vec![
                "Dana Scully 2287",
                "Elwood Blues 7338",
                "Fox Mulder 3181",
                "Michael Knight 4194",
                "Willy Tanner 4121",
            ]
        );
    }
}
