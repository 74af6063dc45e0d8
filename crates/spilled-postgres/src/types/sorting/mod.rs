//! Sorting options for database queries.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Sort order direction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order (A-Z, oldest first, smallest first).
    Asc,
    /// Descending order (Z-A, newest first, largest first).
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns whether the sort order is ascending.
    #[inline]
    pub fn is_asc(self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    /// Returns whether the sort order is descending.
    #[inline]
    pub fn is_desc(self) -> bool {
        matches!(self, SortDirection::Desc)
    }
}
