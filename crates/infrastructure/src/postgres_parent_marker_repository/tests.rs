use parentmanager_application::{ParentMarkerRepository, RelationshipRepository};
use parentmanager_core::AppError;
use parentmanager_domain::{ParentListQuery, ParentSortColumn, SortDirection, UserId};

use super::PostgresParentMarkerRepository;
use super::listing::like_pattern;
use crate::PostgresRelationshipRepository;
use crate::test_support::{seed_user, test_pool};

#[test]
fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("ann"), "%ann%");
    assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
}

#[tokio::test]
async fn marker_round_trip_is_idempotent() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresParentMarkerRepository::new(pool.clone());
    let user_id = seed_user(&pool, "Marker", "Roundtrip").await;

    assert!(matches!(repository.is_parent(user_id).await, Ok(false)));
    assert!(repository.mark_parent(user_id, 100).await.is_ok());
    assert!(repository.mark_parent(user_id, 200).await.is_ok());
    assert!(matches!(repository.is_parent(user_id).await, Ok(true)));

    let candidates = repository.list_parent_candidates().await.unwrap_or_default();
    assert!(candidates.iter().all(|candidate| candidate.user_id != user_id));

    assert!(repository.clear_parent(user_id).await.is_ok());
    assert!(repository.clear_parent(user_id).await.is_ok());
    assert!(matches!(repository.is_parent(user_id).await, Ok(false)));
}

#[tokio::test]
async fn marking_unknown_user_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresParentMarkerRepository::new(pool);

    let result = repository.mark_parent(UserId::from_i64(i64::MAX), 1).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn listing_filters_sorts_and_counts_children() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let markers = PostgresParentMarkerRepository::new(pool.clone());
    let relationships = PostgresRelationshipRepository::new(pool.clone());
    let tag = format!("Lst{}", std::process::id());

    let busy = seed_user(&pool, "Busy", &tag).await;
    let idle = seed_user(&pool, "Idle", &tag).await;
    let child_one = seed_user(&pool, "ChildOne", "Listing").await;
    let child_two = seed_user(&pool, "ChildTwo", "Listing").await;
    assert!(markers.mark_parent(busy, 1).await.is_ok());
    assert!(markers.mark_parent(idle, 1).await.is_ok());
    assert!(relationships.insert_relationship(busy, child_one, 1).await.is_ok());
    assert!(relationships.insert_relationship(busy, child_two, 1).await.is_ok());

    let query = ParentListQuery::new(
        Some(tag.to_lowercase()),
        ParentSortColumn::ChildCount,
        SortDirection::Desc,
        0,
        1,
    );
    let first_page = markers.list_parents(&query).await.unwrap_or_default();
    assert_eq!(first_page.total, 2);
    assert_eq!(first_page.parents.len(), 1);
    assert_eq!(first_page.parents[0].user_id, busy);
    assert_eq!(first_page.parents[0].child_count, 2);
    assert_eq!(first_page.parents[0].last_access, None);

    let second_query = ParentListQuery::new(
        Some(tag.clone()),
        ParentSortColumn::ChildCount,
        SortDirection::Desc,
        1,
        1,
    );
    let second_page = markers.list_parents(&second_query).await.unwrap_or_default();
    assert_eq!(second_page.parents.len(), 1);
    assert_eq!(second_page.parents[0].user_id, idle);
    assert_eq!(second_page.parents[0].child_count, 0);
}
