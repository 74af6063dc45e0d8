//! Guys table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Guys table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum GuyConstraints {
    // Guy validation constraints
    #[strum(serialize = "guys_display_name_not_empty")]
    DisplayNameNotEmpty,
    #[strum(serialize = "guys_age_range")]
    AgeRange,

    // Guy reference constraints
    #[strum(serialize = "guys_created_by_fkey")]
    CreatedByFkey,
}

impl GuyConstraints {
    /// Creates a new [`GuyConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            GuyConstraints::DisplayNameNotEmpty | GuyConstraints::AgeRange => {
                ConstraintCategory::Validation
            }

            GuyConstraints::CreatedByFkey => ConstraintCategory::Reference,
        }
    }
}

impl From<GuyConstraints> for String {
    #[inline]
    fn from(val: GuyConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for GuyConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
