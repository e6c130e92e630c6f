//! Query types for the parent listing.

use parentmanager_core::NonEmptyString;
use serde::{Deserialize, Serialize};

use crate::PersonName;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PARENTS_PER_PAGE: u32 = 30;

/// Upper bound on a single listing page.
pub const MAX_PARENTS_PER_PAGE: u32 = 500;

/// Columns the parent listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentSortColumn {
    /// Given name.
    FirstName,
    /// Family name.
    #[default]
    LastName,
    /// Email address.
    Email,
    /// Number of assigned children.
    ChildCount,
    /// Last access timestamp.
    LastAccess,
}

impl ParentSortColumn {
    /// Returns the transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstname",
            Self::LastName => "lastname",
            Self::Email => "email",
            Self::ChildCount => "childcount",
            Self::LastAccess => "lastaccess",
        }
    }

    /// Parses a transport value. Unsupported columns fall back to last name.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "firstname" => Self::FirstName,
            "lastname" => Self::LastName,
            "email" => Self::Email,
            "childcount" => Self::ChildCount,
            "lastaccess" => Self::LastAccess,
            _ => Self::default(),
        }
    }
}

/// Sort direction for the parent listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the SQL keyword.
    #[must_use]
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parses a transport value; anything other than `desc` is ascending.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Filter, order and page window for listing parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentListQuery {
    search: Option<NonEmptyString>,
    sort: ParentSortColumn,
    direction: SortDirection,
    page: u32,
    per_page: u32,
}

impl Default for ParentListQuery {
    fn default() -> Self {
        Self::new(None, ParentSortColumn::default(), SortDirection::default(), 0, 0)
    }
}

impl ParentListQuery {
    /// Creates a normalized listing query.
    ///
    /// Blank search terms are dropped and a zero page size becomes the default.
    #[must_use]
    pub fn new(
        search: Option<String>,
        sort: ParentSortColumn,
        direction: SortDirection,
        page: u32,
        per_page: u32,
    ) -> Self {
        let per_page = match per_page {
            0 => DEFAULT_PARENTS_PER_PAGE,
            value => value.min(MAX_PARENTS_PER_PAGE),
        };

        Self {
            search: search
                .map(|value| value.trim().to_owned())
                .and_then(|value| NonEmptyString::new(value).ok()),
            sort,
            direction,
            page,
            per_page,
        }
    }

    /// Returns the trimmed search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_ref().map(NonEmptyString::as_str)
    }

    /// Returns the sort column.
    #[must_use]
    pub fn sort(&self) -> ParentSortColumn {
        self.sort
    }

    /// Returns the sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Returns the number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.per_page)
    }

    /// Case-insensitive substring match over first name, last name and email.
    #[must_use]
    pub fn matches(&self, name: &PersonName, email: &str) -> bool {
        let Some(term) = self.search() else {
            return true;
        };
        let term = term.to_lowercase();

        [name.first_name(), name.last_name(), email]
            .iter()
            .any(|value| value.to_lowercase().contains(term.as_str()))
    }
}
