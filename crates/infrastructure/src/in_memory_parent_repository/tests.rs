use parentmanager_application::{
    ParentMarkerRepository, PrivacyRepository, RelationshipRepository, RelationshipSide,
};
use parentmanager_core::AppError;
use parentmanager_domain::{ParentListQuery, ParentSortColumn, SortDirection, UserId};

use super::InMemoryParentRepository;

async fn seeded() -> (InMemoryParentRepository, [UserId; 4]) {
    let repository = InMemoryParentRepository::new();
    let ada = repository
        .insert_user("Ada", "Lovelace", "ada@example.org", Some(300))
        .await;
    let bob = repository
        .insert_user("Bob", "Builder", "bob@example.org", None)
        .await;
    let cid = repository
        .insert_user("Cid", "Highwind", "cid@example.org", Some(100))
        .await;
    let dee = repository
        .insert_user("Dee", "Adams", "dee@example.org", None)
        .await;
    (repository, [ada, bob, cid, dee])
}

fn ids<T>(rows: &[T], id: impl Fn(&T) -> UserId) -> Vec<UserId> {
    rows.iter().map(id).collect()
}

#[tokio::test]
async fn listing_sorts_filters_and_pages() {
    let (repository, [ada, bob, cid, dee]) = seeded().await;
    for parent in [ada, bob, cid] {
        assert!(repository.mark_parent(parent, 1).await.is_ok());
    }
    assert!(repository.insert_relationship(cid, dee, 1).await.is_ok());

    let by_name = repository
        .list_parents(&ParentListQuery::default())
        .await
        .unwrap_or_default();
    assert_eq!(by_name.total, 3);
    assert_eq!(ids(&by_name.parents, |row| row.user_id), vec![bob, cid, ada]);

    let by_count = ParentListQuery::new(
        None,
        ParentSortColumn::ChildCount,
        SortDirection::Desc,
        0,
        2,
    );
    let page = repository.list_parents(&by_count).await.unwrap_or_default();
    assert_eq!(page.total, 3);
    assert_eq!(page.parents.len(), 2);
    assert_eq!(page.parents[0].user_id, cid);
    assert_eq!(page.parents[0].child_count, 1);

    let searched = ParentListQuery::new(
        Some("EXAMPLE.ORG".to_owned()),
        ParentSortColumn::LastAccess,
        SortDirection::Asc,
        1,
        2,
    );
    let last_page = repository.list_parents(&searched).await.unwrap_or_default();
    assert_eq!(last_page.total, 3);
    assert_eq!(ids(&last_page.parents, |row| row.user_id), vec![ada]);

    let filtered = ParentListQuery::new(
        Some("high".to_owned()),
        ParentSortColumn::LastName,
        SortDirection::Asc,
        0,
        0,
    );
    let only_cid = repository.list_parents(&filtered).await.unwrap_or_default();
    assert_eq!(ids(&only_cid.parents, |row| row.user_id), vec![cid]);
}

#[tokio::test]
async fn marking_unknown_user_is_not_found() {
    let (repository, [ada, ..]) = seeded().await;

    let result = repository.mark_parent(UserId::from_i64(999), 1).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(matches!(repository.is_parent(UserId::from_i64(999)).await, Ok(false)));
    assert!(repository.mark_parent(ada, 1).await.is_ok());
}

#[tokio::test]
async fn deleted_users_are_hidden_from_listings() {
    let (repository, [ada, bob, _, dee]) = seeded().await;
    assert!(repository.mark_parent(ada, 1).await.is_ok());
    assert!(repository.insert_relationship(ada, bob, 1).await.is_ok());
    repository.mark_user_deleted(bob).await;
    repository.mark_user_deleted(dee).await;

    assert!(repository.list_children(ada).await.unwrap_or_default().is_empty());
    let candidates = repository.list_parent_candidates().await.unwrap_or_default();
    assert!(candidates.iter().all(|row| row.user_id != bob && row.user_id != dee));
}

#[tokio::test]
async fn relationship_constraints_are_enforced() {
    let (repository, [ada, bob, ..]) = seeded().await;

    assert!(repository.insert_relationship(ada, bob, 1).await.is_ok());
    assert!(matches!(
        repository.insert_relationship(ada, bob, 2).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        repository.insert_relationship(ada, ada, 2).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        repository
            .insert_relationship(ada, UserId::from_i64(999), 2)
            .await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn unassigned_candidates_are_ordered_and_exclusive() {
    let (repository, [ada, bob, cid, dee]) = seeded().await;
    assert!(repository.mark_parent(ada, 1).await.is_ok());
    assert!(repository.insert_relationship(ada, bob, 1).await.is_ok());

    let all = repository
        .list_unassigned_candidates(None)
        .await
        .unwrap_or_default();
    assert_eq!(ids(&all, |row| row.user_id), vec![dee, cid]);

    let excluding = repository
        .list_unassigned_candidates(Some(dee))
        .await
        .unwrap_or_default();
    assert_eq!(ids(&excluding, |row| row.user_id), vec![cid]);
}

#[tokio::test]
async fn privacy_export_and_erasure() {
    let (repository, [ada, bob, cid, dee]) = seeded().await;
    assert!(repository.insert_relationship(ada, bob, 20).await.is_ok());
    assert!(repository.insert_relationship(cid, ada, 10).await.is_ok());
    assert!(repository.insert_relationship(cid, dee, 30).await.is_ok());

    let rows = repository
        .list_relationships_for_subject(ada)
        .await
        .unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].side, RelationshipSide::Child);
    assert_eq!(rows[0].counterpart_id, cid);
    assert_eq!(rows[1].side, RelationshipSide::Parent);
    assert_eq!(rows[1].counterpart_name.full_name(), "Bob Builder");

    assert!(matches!(
        repository.delete_relationships_for_subject(ada).await,
        Ok(2)
    ));
    assert_eq!(
        repository
            .list_users_with_relationships()
            .await
            .unwrap_or_default(),
        vec![cid, dee]
    );
    assert!(matches!(repository.delete_all_relationships().await, Ok(1)));
}
