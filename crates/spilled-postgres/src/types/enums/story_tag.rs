//! Story tag enumeration for classifying posted stories.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines the sentiment tags a story can carry.
///
/// This enumeration corresponds to the `STORY_TAG` PostgreSQL enum. A story
/// carries zero or more tags and the feed can filter on any one of them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::StoryTag"]
pub enum StoryTag {
    /// Warning about concerning behavior
    #[db_rename = "red_flag"]
    #[serde(rename = "red_flag")]
    RedFlag,

    /// Positive experience report
    #[db_rename = "good_vibes"]
    #[serde(rename = "good_vibes")]
    GoodVibes,

    /// Mixed or inconclusive experience
    #[db_rename = "unsure"]
    #[serde(rename = "unsure")]
    Unsure,
}

impl StoryTag {
    /// Returns whether this tag marks a negative experience.
    #[inline]
    pub fn is_warning(self) -> bool {
        matches!(self, StoryTag::RedFlag)
    }

    /// Returns whether this tag marks a positive experience.
    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, StoryTag::GoodVibes)
    }
}
