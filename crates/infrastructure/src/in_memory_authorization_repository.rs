use std::collections::HashMap;

use async_trait::async_trait;
use parentmanager_application::AuthorizationRepository;
use parentmanager_core::AppResult;
use parentmanager_domain::Capability;
use tokio::sync::RwLock;

/// In-memory capability store keyed by subject.
#[derive(Debug, Default)]
pub struct InMemoryAuthorizationRepository {
    capabilities: RwLock<HashMap<String, Vec<Capability>>>,
}

impl InMemoryAuthorizationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants a capability to a subject.
    pub async fn grant(&self, subject: &str, capability: Capability) {
        let mut capabilities = self.capabilities.write().await;
        let granted = capabilities.entry(subject.to_owned()).or_default();
        if !granted.contains(&capability) {
            granted.push(capability);
        }
    }
}

#[async_trait]
impl AuthorizationRepository for InMemoryAuthorizationRepository {
    async fn list_capabilities_for_subject(&self, subject: &str) -> AppResult<Vec<Capability>> {
        Ok(self
            .capabilities
            .read()
            .await
            .get(subject)
            .cloned()
            .unwrap_or_default())
    }
}
