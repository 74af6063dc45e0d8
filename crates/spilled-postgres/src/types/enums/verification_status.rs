//! Verification status enumeration for the identity-verification workflow.

use diesel_derive_enum::DbEnum;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Defines where a user currently stands in the identity-verification workflow.
///
/// This enumeration corresponds to the `VERIFICATION_STATUS` PostgreSQL enum and is used
/// to track a submitted ID document from upload through moderator review.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::VerificationStatus"]
pub enum VerificationStatus {
    /// Document submitted and awaiting moderator review
    #[db_rename = "pending"]
    #[serde(rename = "pending")]
    #[default]
    Pending,

    /// Document reviewed and accepted, the user counts as verified
    #[db_rename = "approved"]
    #[serde(rename = "approved")]
    Approved,

    /// Document reviewed and rejected, a reason is recorded
    #[db_rename = "rejected"]
    #[serde(rename = "rejected")]
    Rejected,
}

impl VerificationStatus {
    /// Returns whether this status grants verified privileges.
    #[inline]
    pub fn is_approved(self) -> bool {
        matches!(self, VerificationStatus::Approved)
    }

    /// Returns whether this status is still awaiting review.
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, VerificationStatus::Pending)
    }

    /// Returns whether the review ended in a rejection.
    #[inline]
    pub fn is_rejected(self) -> bool {
        matches!(self, VerificationStatus::Rejected)
    }

    /// Returns whether the review has been resolved either way.
    #[inline]
    pub fn is_resolved(self) -> bool {
        matches!(
            self,
            VerificationStatus::Approved | VerificationStatus::Rejected
        )
    }
}
