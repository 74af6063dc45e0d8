//! Database constraint violations organized by functional area.
//!
//! This module provides a comprehensive enumeration of all database constraint violations,
//! organized into logical groups for better maintainability.

// User-related constraint modules
pub mod users;

// Community-related constraint modules
pub mod comments;
pub mod guys;
pub mod stories;

// Messaging-related constraint modules
pub mod messages;

use std::fmt;

// Re-export all constraint types for convenience
pub use comments::CommentConstraints;
pub use guys::GuyConstraints;
pub use messages::MessageConstraints;
use serde::{Deserialize, Serialize};
pub use stories::StoryConstraints;
pub use users::UserConstraints;

/// Unified constraint violation enum that can represent any database constraint.
///
/// This enum wraps all specific constraint types, providing a single interface
/// for handling any constraint violation while maintaining type safety and
/// organizational benefits of the separate modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    // User-related constraints
    User(UserConstraints),

    // Community-related constraints
    Guy(GuyConstraints),
    Story(StoryConstraints),
    Comment(CommentConstraints),

    // Messaging-related constraints
    Message(MessageConstraints),
}

/// Categories of database constraint violations.
///
/// This enum helps classify constraint violations by their purpose and type,
/// making it easier to handle different categories of errors appropriately.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Business logic constraints (domain-specific rules).
    BusinessLogic,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
    /// Referential integrity constraints (foreign keys).
    Reference,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// This method attempts to parse a constraint name string into the corresponding
    /// enum variant. It returns `None` if the constraint name is not recognized.
    ///
    /// # Arguments
    ///
    /// * `constraint` - The name of the database constraint that was violated
    ///
    /// # Returns
    ///
    /// * `Some(ConstraintViolation)` if the constraint name is recognized
    /// * `None` if the constraint name is unknown
    ///
    /// # Examples
    ///
    /// ```
    /// use spilled_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("users_email_address_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        // Route based on constraint name prefix for optimal performance
        // This avoids unnecessary parsing attempts by checking prefixes first

        if constraint.starts_with("users_") {
            if let Some(c) = UserConstraints::new(constraint) {
                return Some(ConstraintViolation::User(c));
            }
        } else if constraint.starts_with("guys_") {
            if let Some(c) = GuyConstraints::new(constraint) {
                return Some(ConstraintViolation::Guy(c));
            }
        } else if constraint.starts_with("stories_") {
            if let Some(c) = StoryConstraints::new(constraint) {
                return Some(ConstraintViolation::Story(c));
            }
        } else if constraint.starts_with("comments_") {
            if let Some(c) = CommentConstraints::new(constraint) {
                return Some(ConstraintViolation::Comment(c));
            }
        } else if constraint.starts_with("messages_")
            && let Some(c) = MessageConstraints::new(constraint)
        {
            return Some(ConstraintViolation::Message(c));
        }

        None
    }

    /// Returns the table name associated with this constraint.
    ///
    /// This is useful for categorizing errors by the table they affect.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::Guy(_) => "guys",
            ConstraintViolation::Story(_) => "stories",
            ConstraintViolation::Comment(_) => "comments",
            ConstraintViolation::Message(_) => "messages",
        }
    }

    /// Returns the functional area this constraint belongs to.
    ///
    /// This groups constraints by their business domain for higher-level categorization.
    pub fn functional_area(&self) -> &'static str {
        match self {
            ConstraintViolation::User(_) => "users",

            ConstraintViolation::Guy(_)
            | ConstraintViolation::Story(_)
            | ConstraintViolation::Comment(_) => "community",

            ConstraintViolation::Message(_) => "messaging",
        }
    }

    /// Returns the category of this constraint violation.
    ///
    /// This helps categorize errors by their type for better error handling and reporting.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::Guy(c) => c.categorize(),
            ConstraintViolation::Story(c) => c.categorize(),
            ConstraintViolation::Comment(c) => c.categorize(),
            ConstraintViolation::Message(c) => c.categorize(),
        }
    }

    /// Returns the underlying constraint name as used in the database.
    #[inline]
    pub fn constraint_name(&self) -> String {
        self.to_string()
    }

    /// Returns the column guarded by a unique constraint, if any.
    ///
    /// This is used to translate unique-index violations into field-level
    /// duplicate errors.
    pub fn unique_field(&self) -> Option<&'static str> {
        match self {
            ConstraintViolation::User(c) => c.unique_field(),
            _ => None,
        }
    }

    /// Returns the column that callers should report for this violation.
    pub fn field(&self) -> &'static str {
        match self {
            ConstraintViolation::User(c) => match c {
                UserConstraints::NicknameNotEmpty => "nickname",
                UserConstraints::VerifiedMatchesStatus => "is_verified",
                UserConstraints::RejectionReasonOnlyRejected => "rejection_reason",
                UserConstraints::VerifiedAtOnlyApproved => "verified_at",
                UserConstraints::EmailAddressUnique => "email_address",
                UserConstraints::PhoneNumberUnique => "phone_number",
            },
            ConstraintViolation::Guy(c) => match c {
                GuyConstraints::DisplayNameNotEmpty => "display_name",
                GuyConstraints::AgeRange => "age",
                GuyConstraints::CreatedByFkey => "created_by",
            },
            ConstraintViolation::Story(c) => match c {
                StoryConstraints::BodyNotEmpty | StoryConstraints::BodyLengthMax => "body",
                StoryConstraints::GuyIdFkey => "guy_id",
                StoryConstraints::UserIdFkey => "user_id",
            },
            ConstraintViolation::Comment(c) => match c {
                CommentConstraints::BodyNotEmpty | CommentConstraints::BodyLengthMax => "body",
                CommentConstraints::StoryIdFkey => "story_id",
                CommentConstraints::UserIdFkey => "user_id",
            },
            ConstraintViolation::Message(c) => match c {
                MessageConstraints::BodyNotEmpty | MessageConstraints::BodyLengthMax => "body",
                MessageConstraints::ExpiresAfterCreated => "expires_at",
                MessageConstraints::NoSelfSend => "receiver_id",
                MessageConstraints::SenderIdFkey => "sender_id",
                MessageConstraints::ReceiverIdFkey => "receiver_id",
            },
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => write!(f, "{}", c),
            ConstraintViolation::Guy(c) => write!(f, "{}", c),
            ConstraintViolation::Story(c) => write!(f, "{}", c),
            ConstraintViolation::Comment(c) => write!(f, "{}", c),
            ConstraintViolation::Message(c) => write!(f, "{}", c),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_constraint_parsing() {
        assert_eq!(
            ConstraintViolation::new("users_email_address_unique_idx"),
            Some(ConstraintViolation::User(
                UserConstraints::EmailAddressUnique
            ))
        );

        assert_eq!(
            ConstraintViolation::new("messages_no_self_send"),
            Some(ConstraintViolation::Message(MessageConstraints::NoSelfSend))
        );

        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
    }

    #[test]
    fn test_constraint_round_trip() {
        for c in UserConstraints::iter() {
            assert_eq!(UserConstraints::new(&c.to_string()), Some(c));
        }
        for c in GuyConstraints::iter() {
            assert_eq!(GuyConstraints::new(&c.to_string()), Some(c));
        }
        for c in StoryConstraints::iter() {
            assert_eq!(StoryConstraints::new(&c.to_string()), Some(c));
        }
        for c in CommentConstraints::iter() {
            assert_eq!(CommentConstraints::new(&c.to_string()), Some(c));
        }
        for c in MessageConstraints::iter() {
            assert_eq!(MessageConstraints::new(&c.to_string()), Some(c));
        }
    }

    #[test]
    fn test_table_name_extraction() {
        let violation = ConstraintViolation::User(UserConstraints::EmailAddressUnique);
        assert_eq!(violation.table_name(), "users");

        let violation = ConstraintViolation::Guy(GuyConstraints::AgeRange);
        assert_eq!(violation.table_name(), "guys");

        let violation = ConstraintViolation::Story(StoryConstraints::BodyLengthMax);
        assert_eq!(violation.table_name(), "stories");
    }

    #[test]
    fn test_functional_area_extraction() {
        let violation = ConstraintViolation::User(UserConstraints::PhoneNumberUnique);
        assert_eq!(violation.functional_area(), "users");

        let violation = ConstraintViolation::Comment(CommentConstraints::BodyNotEmpty);
        assert_eq!(violation.functional_area(), "community");

        let violation = ConstraintViolation::Message(MessageConstraints::SenderIdFkey);
        assert_eq!(violation.functional_area(), "messaging");
    }

    #[test]
    fn test_constraint_categorization() {
        let violation = ConstraintViolation::Guy(GuyConstraints::AgeRange);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Validation
        );

        let violation = ConstraintViolation::Message(MessageConstraints::ExpiresAfterCreated);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Chronological
        );

        let violation = ConstraintViolation::Message(MessageConstraints::NoSelfSend);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::BusinessLogic
        );

        let violation = ConstraintViolation::Story(StoryConstraints::GuyIdFkey);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Reference
        );
    }

    #[test]
    fn test_constraint_name_method() {
        let violation = ConstraintViolation::User(UserConstraints::VerifiedMatchesStatus);
        assert_eq!(violation.constraint_name(), "users_verified_matches_status");
    }

    #[test]
    fn test_field_routing() {
        let violation = ConstraintViolation::User(UserConstraints::EmailAddressUnique);
        assert_eq!(violation.unique_field(), Some("email_address"));
        assert_eq!(violation.field(), "email_address");

        let violation = ConstraintViolation::Guy(GuyConstraints::AgeRange);
        assert_eq!(violation.unique_field(), None);
        assert_eq!(violation.field(), "age");

        let violation = ConstraintViolation::Message(MessageConstraints::NoSelfSend);
        assert_eq!(violation.field(), "receiver_id");
    }
}
