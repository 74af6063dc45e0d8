//! Filtering options for message queries.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Filter options for chat history between two users.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ChatHistoryFilter {
    /// Whether to include messages whose expiry has passed.
    #[serde(default)]
    pub include_expired: bool,
    /// Only messages sent at or after this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_after: Option<Timestamp>,
    /// Only messages sent at or before this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_before: Option<Timestamp>,
}

impl ChatHistoryFilter {
    /// Creates a new empty filter.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Includes expired messages in the history.
    #[inline]
    pub fn with_expired(mut self) -> Self {
        self.include_expired = true;
        self
    }

    /// Filters by lower sent-time bound (inclusive).
    #[inline]
    pub fn with_sent_after(mut self, sent_after: Timestamp) -> Self {
        self.sent_after = Some(sent_after);
        self
    }

    /// Filters by upper sent-time bound (inclusive).
    #[inline]
    pub fn with_sent_before(mut self, sent_before: Timestamp) -> Self {
        self.sent_before = Some(sent_before);
        self
    }

    /// Returns whether any filter is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.include_expired && self.sent_after.is_none() && self.sent_before.is_none()
    }
}

/// Filter options for the conversation overview.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ConversationFilter {
    /// Case-insensitive search on the counterparty nickname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ConversationFilter {
    /// Creates a new empty filter.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by counterparty nickname.
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
    fn chat_history_builder() {
        let filter = ChatHistoryFilter::new().with_expired();
        assert!(filter.include_expired);
        assert!(filter.sent_after.is_none());
        assert!(!filter.is_empty());
    }

    #[test]
    fn conversation_builder() {
        let filter = ConversationFilter::new().with_search("Nia");
        assert_eq!(filter.search.as_deref(), Some("Nia"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn defaults_are_empty() {
        assert!(ChatHistoryFilter::new().is_empty());
        assert!(ConversationFilter::new().is_empty());
    }
}
