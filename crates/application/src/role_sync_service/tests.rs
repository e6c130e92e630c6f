use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use parentmanager_core::{AppError, AppResult};
use parentmanager_domain::{RoleGrant, RoleId, RoleSyncSettings, UserId};

use crate::RoleGrantRepository;

use super::{RoleSyncOutcome, RoleSyncService};

#[derive(Default)]
struct FakeRoleGrantRepository {
    grants: Mutex<Vec<RoleGrant>>,
    fail_writes: bool,
}

#[async_trait]
impl RoleGrantRepository for FakeRoleGrantRepository {
    async fn has_role(
        &self,
        role_id: RoleId,
        user_id: UserId,
        scope_user_id: UserId,
    ) -> AppResult<bool> {
        Ok(self.grants.lock().await.iter().any(|grant| {
            grant.role_id() == role_id
                && grant.user_id() == user_id
                && grant.scope_user_id() == scope_user_id
        }))
    }

    async fn create_grant(&self, grant: &RoleGrant) -> AppResult<()> {
        if self.fail_writes {
            return Err(AppError::Internal("role store offline".to_owned()));
        }
        self.grants.lock().await.push(grant.clone());
        Ok(())
    }

    async fn remove_grant(&self, grant: &RoleGrant) -> AppResult<u64> {
        if self.fail_writes {
            return Err(AppError::Internal("role store offline".to_owned()));
        }
        let mut grants = self.grants.lock().await;
        let before = grants.len();
        grants.retain(|stored| stored != grant);
        Ok((before - grants.len()) as u64)
    }
}

fn user(value: i64) -> UserId {
    UserId::from_i64(value)
}

fn service(
    settings: RoleSyncSettings,
    repository: Arc<FakeRoleGrantRepository>,
) -> RoleSyncService {
    RoleSyncService::new(settings, repository)
}

#[tokio::test]
async fn creation_grants_role_once() {
    let repository = Arc::new(FakeRoleGrantRepository::default());
    let service = service(RoleSyncSettings::new(true, RoleId::from_i64(9)), repository.clone());

    assert_eq!(
        service.on_relationship_created(user(1), user(2)).await,
        RoleSyncOutcome::Granted
    );
    assert_eq!(
        service.on_relationship_created(user(1), user(2)).await,
        RoleSyncOutcome::AlreadyGranted
    );

    let grants = repository.grants.lock().await;
    assert_eq!(grants.len(), 1);
    assert!(grants[0].is_owned_by_parent_manager());
    assert_eq!(grants[0].user_id(), user(1));
    assert_eq!(grants[0].scope_user_id(), user(2));
}

#[tokio::test]
async fn creation_is_skipped_when_auto_assign_disabled() {
    let repository = Arc::new(FakeRoleGrantRepository::default());
    let service = service(RoleSyncSettings::new(false, RoleId::from_i64(9)), repository.clone());

    assert_eq!(
        service.on_relationship_created(user(1), user(2)).await,
        RoleSyncOutcome::Skipped
    );
    assert!(repository.grants.lock().await.is_empty());
}

#[tokio::test]
async fn creation_is_skipped_without_role() {
    let repository = Arc::new(FakeRoleGrantRepository::default());
    let service = service(RoleSyncSettings::new(true, RoleId::from_i64(0)), repository.clone());

    assert_eq!(
        service.on_relationship_created(user(1), user(2)).await,
        RoleSyncOutcome::Skipped
    );
}

#[tokio::test]
async fn creation_failure_is_soft() {
    let repository = Arc::new(FakeRoleGrantRepository {
        fail_writes: true,
        ..FakeRoleGrantRepository::default()
    });
    let service = service(RoleSyncSettings::new(true, RoleId::from_i64(9)), repository);

    let outcome = service.on_relationship_created(user(1), user(2)).await;
    assert!(outcome.is_failure());
}

// Removal is gated on the role alone, unlike creation.
#[tokio::test]
async fn removal_revokes_even_when_auto_assign_disabled() {
    let repository = Arc::new(FakeRoleGrantRepository::default());
    repository.grants.lock().await.push(RoleGrant::for_parent(
        RoleId::from_i64(9),
        user(1),
        user(2),
    ));
    let service = service(RoleSyncSettings::new(false, RoleId::from_i64(9)), repository.clone());

    assert_eq!(
        service.on_relationship_removed(user(1), user(2)).await,
        RoleSyncOutcome::Revoked
    );
    assert!(repository.grants.lock().await.is_empty());
}

#[tokio::test]
async fn removal_leaves_grants_from_other_components() {
    let repository = Arc::new(FakeRoleGrantRepository::default());
    let manual = RoleGrant::new(RoleId::from_i64(9), user(1), user(2), "manual");
    repository.grants.lock().await.push(manual.clone());
    let service = service(RoleSyncSettings::new(true, RoleId::from_i64(9)), repository.clone());

    assert_eq!(
        service.on_relationship_removed(user(1), user(2)).await,
        RoleSyncOutcome::Revoked
    );
    assert_eq!(*repository.grants.lock().await, vec![manual]);
}

#[tokio::test]
async fn removal_is_skipped_without_role() {
    let repository = Arc::new(FakeRoleGrantRepository::default());
    let service = service(RoleSyncSettings::disabled(), repository);

    assert_eq!(
        service.on_relationship_removed(user(1), user(2)).await,
        RoleSyncOutcome::Skipped
    );
}
