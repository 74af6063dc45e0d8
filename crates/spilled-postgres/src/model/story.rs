//! Story model for PostgreSQL database operations.
//!
//! Stories are experience reports posted about a guy profile. Each story is
//! authored by a verified user and may be shown anonymously.
//!
//! ## Models
//!
//! - [`Story`] - Main story model
//! - [`NewStory`] - Data structure for creating new stories
//! - [`UpdateStory`] - Data structure for updating existing stories

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::stories;
use crate::types::{HasCreatedAt, StoryTag};

/// Experience report posted about a guy profile.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Story {
    /// Unique story identifier.
    pub id: Uuid,
    /// Profile the story is about.
    pub guy_id: Uuid,
    /// Author of the story.
    pub user_id: Uuid,
    /// Story text.
    pub body: String,
    /// Tags classifying the experience.
    pub tags: Vec<StoryTag>,
    /// URL of an attached image, if any.
    pub image_url: Option<String>,
    /// Whether the author's identity is hidden.
    pub is_anonymous: bool,
    /// Display name shown when not anonymous.
    pub nickname: Option<String>,
    /// Timestamp when the story was created.
    pub created_at: Timestamp,
}

/// Data for creating a new story.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewStory {
    /// Profile the story is about.
    pub guy_id: Uuid,
    /// Author of the story.
    pub user_id: Uuid,
    /// Story text.
    pub body: String,
    /// Tags classifying the experience.
    pub tags: Vec<StoryTag>,
    /// URL of an attached image, if any.
    pub image_url: Option<String>,
    /// Whether the author's identity is hidden.
    pub is_anonymous: bool,
    /// Display name shown when not anonymous.
    pub nickname: Option<String>,
}

/// Data for updating a story.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateStory {
    /// Story text.
    pub body: Option<String>,
    /// Tags classifying the experience.
    pub tags: Option<Vec<StoryTag>>,
    /// Image URL. `Some(None)` clears the column.
    pub image_url: Option<Option<String>>,
    /// Whether the author's identity is hidden.
    pub is_anonymous: Option<bool>,
    /// Display name. `Some(None)` clears the column.
    pub nickname: Option<Option<String>>,
}

impl Story {
    /// Returns whether the story carries the given tag.
    pub fn has_tag(&self, tag: StoryTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Returns whether the story carries a warning tag.
    pub fn has_warning(&self) -> bool {
        self.tags.iter().any(|tag| tag.is_warning())
    }

    /// Returns whether the story has an attached image.
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .is_some_and(|image_url| !image_url.is_empty())
    }

    /// Returns the name to display for the author.
    ///
    /// Anonymous stories never expose the stored nickname.
    pub fn display_nickname(&self) -> Option<&str> {
        if self.is_anonymous {
            None
        } else {
            self.nickname.as_deref()
        }
    }

    /// Returns whether the given user authored this story.
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

impl HasCreatedAt for Story {
    fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_story(is_anonymous: bool) -> Story {
        Story {
            id: Uuid::new_v4(),
            guy_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            body: "We met at a cafe downtown.".to_owned(),
            tags: vec![StoryTag::RedFlag],
            image_url: None,
            is_anonymous,
            nickname: Some("Amara".to_owned()),
            created_at: jiff::Timestamp::now().into(),
        }
    }

    #[test]
    fn tag_checks() {
        let story = sample_story(false);
        assert!(story.has_tag(StoryTag::RedFlag));
        assert!(!story.has_tag(StoryTag::GoodVibes));
        assert!(story.has_warning());
    }

    #[test]
    fn anonymous_hides_nickname() {
        assert_eq!(sample_story(false).display_nickname(), Some("Amara"));
        assert_eq!(sample_story(true).display_nickname(), None);
    }

    #[test]
    fn author_check() {
        let story = sample_story(false);
        assert!(story.is_authored_by(story.user_id));
        assert!(!story.is_authored_by(Uuid::new_v4()));
    }
}
