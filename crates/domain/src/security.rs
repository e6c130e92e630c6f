use std::str::FromStr;

use parentmanager_core::AppError;
use serde::{Deserialize, Serialize};

/// Host capabilities checked before any operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Allows managing parents, children and their relationships.
    ParentsManage,
    /// Allows exporting and erasing stored relationship data for a user.
    PrivacyManage,
}

impl Capability {
    /// Returns a stable storage value for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParentsManage => "parents.manage",
            Self::PrivacyManage => "privacy.manage",
        }
    }

    /// Returns all known capabilities.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Capability] = &[Capability::ParentsManage, Capability::PrivacyManage];

        ALL
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "parents.manage" => Ok(Self::ParentsManage),
            "privacy.manage" => Ok(Self::PrivacyManage),
            _ => Err(AppError::Validation(format!(
                "unknown capability value '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Capability;

    #[test]
    fn capability_roundtrip_storage_value() {
        for capability in Capability::all() {
            let restored = Capability::from_str(capability.as_str());
            assert!(restored.is_ok());
            assert_eq!(restored.unwrap_or(Capability::PrivacyManage), *capability);
        }
    }

    #[test]
    fn unknown_capability_is_rejected() {
        assert!(Capability::from_str("parents.delete").is_err());
    }
}
