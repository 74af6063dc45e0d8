//! Filtering options for the story feed.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{SortDirection, StoryTag};

/// Filter options for the story feed query.
///
/// All predicates are optional and combine with AND semantics. The feed is
/// always ordered by creation time; `sort` only picks the direction.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StoryFeedFilter {
    /// Case-insensitive search across story body, guy name and author nickname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Only stories carrying this tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<StoryTag>,
    /// Only stories about this guy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guy_id: Option<Uuid>,
    /// Only stories authored by this user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Only stories created at or after this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_after: Option<Timestamp>,
    /// Only stories created at or before this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_before: Option<Timestamp>,
    /// Sort direction on creation time. Defaults to newest first.
    #[serde(default)]
    pub sort: SortDirection,
}

impl StoryFeedFilter {
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

    /// Filters by tag.
    #[inline]
    pub fn with_tag(mut self, tag: StoryTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Filters by guy.
    #[inline]
    pub fn with_guy_id(mut self, guy_id: Uuid) -> Self {
        self.guy_id = Some(guy_id);
        self
    }

    /// Filters by author.
    #[inline]
    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Filters by lower creation-time bound (inclusive).
    #[inline]
    pub fn with_created_after(mut self, created_after: Timestamp) -> Self {
        self.created_after = Some(created_after);
        self
    }

    /// Filters by upper creation-time bound (inclusive).
    #[inline]
    pub fn with_created_before(mut self, created_before: Timestamp) -> Self {
        self.created_before = Some(created_before);
        self
    }

    /// Sets the sort direction.
    #[inline]
    pub fn with_sort(mut self, sort: SortDirection) -> Self {
        self.sort = sort;
        self
    }

    /// Returns whether any filter is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.tag.is_none()
            && self.guy_id.is_none()
            && self.user_id.is_none()
            && self.created_after.is_none()
            && self.created_before.is_none()
            && self.sort == SortDirection::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_named_field_only() {
        let filter = StoryFeedFilter::new().with_tag(StoryTag::RedFlag);
        assert_eq!(filter.tag, Some(StoryTag::RedFlag));
        assert!(filter.search.is_none());
        assert!(filter.guy_id.is_none());
        assert!(filter.user_id.is_none());
        assert!(filter.created_after.is_none());
        assert!(filter.created_before.is_none());
        assert!(!filter.is_empty());
    }

    #[test]
    fn default_is_empty() {
        assert!(StoryFeedFilter::new().is_empty());
        assert_eq!(StoryFeedFilter::new().sort, SortDirection::Desc);
    }

    #[test]
    fn non_default_sort_is_not_empty() {
        let filter = StoryFeedFilter::new().with_sort(SortDirection::Asc);
        assert!(!filter.is_empty());
    }
}
