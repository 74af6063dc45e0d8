//! Filtering options for user queries.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Filter options for user listing queries.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UserSearchFilter {
    /// Case-insensitive search across nickname, email address and phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl UserSearchFilter {
    /// Creates a new empty filter.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by a search term.
    #[inline]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns whether any filter is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_search() {
        let filter = UserSearchFilter::new().with_search("amara");
        assert_eq!(filter.search.as_deref(), Some("amara"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn default_is_empty() {
        assert!(UserSearchFilter::new().is_empty());
    }
}
