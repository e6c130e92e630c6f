use parentmanager_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Identifier of a parent/child relationship row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RelationshipId(i64);

impl RelationshipId {
    /// Creates a relationship identifier from a stored value.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// Parses a transport value, rejecting non-positive identifiers.
    pub fn from_transport(value: i64) -> AppResult<Self> {
        if value <= 0 {
            return Err(AppError::Validation(format!(
                "relation id must be a positive integer, got {value}"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RelationshipId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Association between a parent account and one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    id: RelationshipId,
    parent_id: UserId,
    child_id: UserId,
    created_at: i64,
}

impl Relationship {
    /// Creates a relationship from persisted values.
    ///
    /// `created_at` is a unix timestamp in seconds.
    #[must_use]
    pub fn new(id: RelationshipId, parent_id: UserId, child_id: UserId, created_at: i64) -> Self {
        Self {
            id,
            parent_id,
            child_id,
            created_at,
        }
    }

    /// Returns the row identifier.
    #[must_use]
    pub fn id(&self) -> RelationshipId {
        self.id
    }

    /// Returns the parent account.
    #[must_use]
    pub fn parent_id(&self) -> UserId {
        self.parent_id
    }

    /// Returns the child account.
    #[must_use]
    pub fn child_id(&self) -> UserId {
        self.child_id
    }

    /// Returns the creation time as a unix timestamp.
    #[must_use]
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Returns whether `user_id` takes part in this relationship on either side.
    #[must_use]
    pub fn involves(&self, user_id: UserId) -> bool {
        self.parent_id == user_id || self.child_id == user_id
    }
}
