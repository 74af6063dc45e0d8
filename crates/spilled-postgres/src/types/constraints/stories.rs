//! Stories table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Stories table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum StoryConstraints {
    // Story validation constraints
    #[strum(serialize = "stories_body_not_empty")]
    BodyNotEmpty,
    #[strum(serialize = "stories_body_length_max")]
    BodyLengthMax,

    // Story reference constraints
    #[strum(serialize = "stories_guy_id_fkey")]
    GuyIdFkey,
    #[strum(serialize = "stories_user_id_fkey")]
    UserIdFkey,
}

impl StoryConstraints {
    /// Creates a new [`StoryConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            StoryConstraints::BodyNotEmpty | StoryConstraints::BodyLengthMax => {
                ConstraintCategory::Validation
            }

            StoryConstraints::GuyIdFkey | StoryConstraints::UserIdFkey => {
                ConstraintCategory::Reference
            }
        }
    }
}

impl From<StoryConstraints> for String {
    #[inline]
    fn from(val: StoryConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for StoryConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
