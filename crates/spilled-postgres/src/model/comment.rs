//! Comment model for PostgreSQL database operations.
//!
//! Comments are short replies attached to a story, with the same optional
//! anonymity as the story itself.
//!
//! ## Models
//!
//! - [`Comment`] - Main comment model
//! - [`NewComment`] - Data structure for creating new comments
//! - [`UpdateComment`] - Data structure for updating existing comments

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::comments;
use crate::types::HasCreatedAt;

/// Reply attached to a story.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// Story the comment replies to.
    pub story_id: Uuid,
    /// Author of the comment.
    pub user_id: Uuid,
    /// Comment text.
    pub body: String,
    /// Whether the author's identity is hidden.
    pub is_anonymous: bool,
    /// Display name shown when not anonymous.
    pub nickname: Option<String>,
    /// Timestamp when the comment was created.
    pub created_at: Timestamp,
}

/// Data for creating a new comment.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewComment {
    /// Story the comment replies to.
    pub story_id: Uuid,
    /// Author of the comment.
    pub user_id: Uuid,
    /// Comment text.
    pub body: String,
    /// Whether the author's identity is hidden.
    pub is_anonymous: bool,
    /// Display name shown when not anonymous.
    pub nickname: Option<String>,
}

/// Data for updating a comment.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateComment {
    /// Comment text.
    pub body: Option<String>,
    /// Whether the author's identity is hidden.
    pub is_anonymous: Option<bool>,
    /// Display name. `Some(None)` clears the column.
    pub nickname: Option<Option<String>>,
}

impl Comment {
    /// Returns the name to display for the author.
    ///
    /// Anonymous comments never expose the stored nickname.
    pub fn display_nickname(&self) -> Option<&str> {
        if self.is_anonymous {
            None
        } else {
            self.nickname.as_deref()
        }
    }

    /// Returns whether the given user authored this comment.
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

impl HasCreatedAt for Comment {
    fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_comment(is_anonymous: bool) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            story_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            body: "Same thing happened to me.".to_owned(),
            is_anonymous,
            nickname: Some("Nia".to_owned()),
            created_at: jiff::Timestamp::now().into(),
        }
    }

    #[test]
    fn anonymous_hides_nickname() {
        assert_eq!(sample_comment(false).display_nickname(), Some("Nia"));
        assert_eq!(sample_comment(true).display_nickname(), None);
    }

    #[test]
    fn author_check() {
        let comment = sample_comment(false);
        assert!(comment.is_authored_by(comment.user_id));
        assert!(!comment.is_authored_by(Uuid::new_v4()));
    }
}
