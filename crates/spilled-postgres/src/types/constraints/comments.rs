//! Comments table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Comments table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum CommentConstraints {
    // Comment validation constraints
    #[strum(serialize = "comments_body_not_empty")]
    BodyNotEmpty,
    #[strum(serialize = "comments_body_length_max")]
    BodyLengthMax,

    // Comment reference constraints
    #[strum(serialize = "comments_story_id_fkey")]
    StoryIdFkey,
    #[strum(serialize = "comments_user_id_fkey")]
    UserIdFkey,
}

impl CommentConstraints {
    /// Creates a new [`CommentConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            CommentConstraints::BodyNotEmpty | CommentConstraints::BodyLengthMax => {
                ConstraintCategory::Validation
            }

            CommentConstraints::StoryIdFkey | CommentConstraints::UserIdFkey => {
                ConstraintCategory::Reference
            }
        }
    }
}

impl From<CommentConstraints> for String {
    #[inline]
    fn from(val: CommentConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for CommentConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
