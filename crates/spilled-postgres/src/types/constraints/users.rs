//! Users table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Users table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum UserConstraints {
    // User validation constraints
    #[strum(serialize = "users_nickname_not_empty")]
    NicknameNotEmpty,

    // User business logic constraints
    #[strum(serialize = "users_verified_matches_status")]
    VerifiedMatchesStatus,
    #[strum(serialize = "users_rejection_reason_only_rejected")]
    RejectionReasonOnlyRejected,
    #[strum(serialize = "users_verified_at_only_approved")]
    VerifiedAtOnlyApproved,

    // User unique constraints
    #[strum(serialize = "users_email_address_unique_idx")]
    EmailAddressUnique,
    #[strum(serialize = "users_phone_number_unique_idx")]
    PhoneNumberUnique,
}

impl UserConstraints {
    /// Creates a new [`UserConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            UserConstraints::NicknameNotEmpty => ConstraintCategory::Validation,

            UserConstraints::VerifiedMatchesStatus
            | UserConstraints::RejectionReasonOnlyRejected
            | UserConstraints::VerifiedAtOnlyApproved => ConstraintCategory::BusinessLogic,

            UserConstraints::EmailAddressUnique | UserConstraints::PhoneNumberUnique => {
                ConstraintCategory::Uniqueness
            }
        }
    }

    /// Returns the column name behind a uniqueness constraint.
    pub fn unique_field(&self) -> Option<&'static str> {
        match self {
            UserConstraints::EmailAddressUnique => Some("email_address"),
            UserConstraints::PhoneNumberUnique => Some("phone_number"),
            _ => None,
        }
    }
}

impl From<UserConstraints> for String {
    #[inline]
    fn from(val: UserConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for UserConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
