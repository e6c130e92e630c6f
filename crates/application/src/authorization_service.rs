use std::sync::Arc;

use async_trait::async_trait;
use parentmanager_core::{AppError, AppResult, UserIdentity};
use parentmanager_domain::Capability;

/// Capability check the services depend on but the host platform owns.
#[async_trait]
pub trait CapabilityChecker: Send + Sync {
    /// Fails with `Forbidden` unless the actor holds the capability.
    async fn require_capability(
        &self,
        actor: &UserIdentity,
        capability: Capability,
    ) -> AppResult<()>;
}

/// Repository port for capability lookups in the host permission store.
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Lists capabilities granted to a subject.
    async fn list_capabilities_for_subject(&self, subject: &str) -> AppResult<Vec<Capability>>;
}

/// Capability checker backed by the host permission store.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }

    /// Returns whether the subject currently holds the capability.
    pub async fn has_capability(&self, subject: &str, capability: Capability) -> AppResult<bool> {
        let capabilities = self
            .repository
            .list_capabilities_for_subject(subject)
            .await?;

        Ok(capabilities.contains(&capability))
    }
}

#[async_trait]
impl CapabilityChecker for AuthorizationService {
    async fn require_capability(
        &self,
        actor: &UserIdentity,
        capability: Capability,
    ) -> AppResult<()> {
        if self.has_capability(actor.subject(), capability).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{}' is missing capability '{}'",
            actor.subject(),
            capability.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parentmanager_core::{AppError, AppResult, UserIdentity};
    use parentmanager_domain::Capability;

    use super::{AuthorizationRepository, AuthorizationService, CapabilityChecker};

    struct FakeAuthorizationRepository {
        grants: HashMap<String, Vec<Capability>>,
    }

    #[async_trait]
    impl AuthorizationRepository for FakeAuthorizationRepository {
        async fn list_capabilities_for_subject(
            &self,
            subject: &str,
        ) -> AppResult<Vec<Capability>> {
            Ok(self.grants.get(subject).cloned().unwrap_or_default())
        }
    }

    fn service() -> AuthorizationService {
        AuthorizationService::new(Arc::new(FakeAuthorizationRepository {
            grants: HashMap::from([("admin".to_owned(), vec![Capability::ParentsManage])]),
        }))
    }

    #[tokio::test]
    async fn granted_capability_passes() {
        let actor = UserIdentity::new("admin", "Admin", None);
        let result = service()
            .require_capability(&actor, Capability::ParentsManage)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn missing_capability_is_forbidden() {
        let admin = UserIdentity::new("admin", "Admin", None);
        let privacy = service()
            .require_capability(&admin, Capability::PrivacyManage)
            .await;
        assert!(matches!(privacy, Err(AppError::Forbidden(_))));

        let stranger = UserIdentity::new("guest", "Guest", None);
        let manage = service()
            .require_capability(&stranger, Capability::ParentsManage)
            .await;
        assert!(matches!(manage, Err(AppError::Forbidden(_))));
    }
}
