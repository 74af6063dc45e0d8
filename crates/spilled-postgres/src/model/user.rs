//! Main user model for PostgreSQL database operations.
//!
//! This module provides the core user model for account identity and the
//! identity-verification workflow.
//!
//! ## Models
//!
//! - [`User`] - Main user model with identity and verification state
//! - [`NewUser`] - Data structure for creating new users
//! - [`UpdateUser`] - Data structure for updating existing users

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::users;
use crate::types::{HasCreatedAt, IdDocumentType, VerificationStatus};

/// Main user model representing a registered user in the system.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Optional email address, unique when present.
    pub email_address: Option<String>,
    /// Optional phone number, unique when present.
    pub phone_number: Option<String>,
    /// Public display name shown on non-anonymous content.
    pub nickname: String,
    /// Whether the user passed identity verification.
    ///
    /// Always equal to `verification_status == Approved`.
    pub is_verified: bool,
    /// Where the user stands in the identity-verification workflow.
    pub verification_status: VerificationStatus,
    /// URL of the uploaded identity document image.
    pub id_image_url: Option<String>,
    /// Kind of identity document that was uploaded.
    pub id_document_type: Option<IdDocumentType>,
    /// Moderator-provided reason, present only after a rejection.
    pub rejection_reason: Option<String>,
    /// Timestamp of the approval, present only while approved.
    pub verified_at: Option<Timestamp>,
    /// Timestamp when the user was created.
    pub created_at: Timestamp,
}

/// Data for creating a new user.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    /// Optional email address, unique when present.
    pub email_address: Option<String>,
    /// Optional phone number, unique when present.
    pub phone_number: Option<String>,
    /// Public display name shown on non-anonymous content.
    pub nickname: String,
    /// URL of the uploaded identity document image.
    pub id_image_url: Option<String>,
    /// Kind of identity document that was uploaded.
    pub id_document_type: Option<IdDocumentType>,
}

/// Data for updating a user.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUser {
    /// Email address. `Some(None)` clears the column.
    pub email_address: Option<Option<String>>,
    /// Phone number. `Some(None)` clears the column.
    pub phone_number: Option<Option<String>>,
    /// Public display name.
    pub nickname: Option<String>,
    /// Verification flag, derived from the status.
    pub is_verified: Option<bool>,
    /// Position in the identity-verification workflow.
    pub verification_status: Option<VerificationStatus>,
    /// URL of the uploaded identity document image.
    pub id_image_url: Option<Option<String>>,
    /// Kind of identity document that was uploaded.
    pub id_document_type: Option<Option<IdDocumentType>>,
    /// Moderator-provided rejection reason.
    pub rejection_reason: Option<Option<String>>,
    /// Timestamp of the approval.
    pub verified_at: Option<Option<Timestamp>>,
}

impl User {
    /// Returns whether the user passed identity verification.
    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Returns whether the user may post stories.
    ///
    /// Posting is restricted to verified users.
    pub fn can_post_stories(&self) -> bool {
        self.is_verified
    }

    /// Returns whether a verification request is awaiting review.
    pub fn is_pending_review(&self) -> bool {
        self.verification_status.is_pending() && self.id_image_url.is_some()
    }

    /// Returns whether the user has an email address set.
    pub fn has_email_address(&self) -> bool {
        self.email_address
            .as_deref()
            .is_some_and(|email_address| !email_address.is_empty())
    }

    /// Returns whether the user has a phone number set.
    pub fn has_phone_number(&self) -> bool {
        self.phone_number
            .as_deref()
            .is_some_and(|phone_number| !phone_number.is_empty())
    }

    /// Returns whether the user has any contact handle at all.
    pub fn has_contact_handle(&self) -> bool {
        self.has_email_address() || self.has_phone_number()
    }
}

impl UpdateUser {
    /// Builds the patch that moves a user to the given verification status.
    ///
    /// The derived columns follow the status invariant: `is_verified` is true
    /// only for approvals, `verified_at` is set only for approvals, and
    /// `rejection_reason` is kept only for rejections.
    pub fn from_verification_status(
        status: VerificationStatus,
        reason: Option<String>,
    ) -> Self {
        let patch = Self {
            verification_status: Some(status),
            ..Self::default()
        };

        match status {
            VerificationStatus::Approved => Self {
                is_verified: Some(true),
                verified_at: Some(Some(jiff::Timestamp::now().into())),
                rejection_reason: Some(None),
                ..patch
            },
            VerificationStatus::Rejected => Self {
                is_verified: Some(false),
                verified_at: Some(None),
                rejection_reason: Some(reason),
                ..patch
            },
            VerificationStatus::Pending => Self {
                is_verified: Some(false),
                verified_at: Some(None),
                rejection_reason: Some(None),
                ..patch
            },
        }
    }
}

impl HasCreatedAt for User {
    fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approval_patch() {
        let patch = UpdateUser::from_verification_status(VerificationStatus::Approved, None);
        assert_eq!(patch.is_verified, Some(true));
        assert_eq!(
            patch.verification_status,
            Some(VerificationStatus::Approved)
        );
        assert_eq!(patch.rejection_reason, Some(None));
        assert!(matches!(patch.verified_at, Some(Some(_))));
        assert!(patch.nickname.is_none());
    }

    #[test]
    fn rejection_patch() {
        let patch = UpdateUser::from_verification_status(
            VerificationStatus::Rejected,
            Some("blurry image".to_owned()),
        );
        assert_eq!(patch.is_verified, Some(false));
        assert_eq!(
            patch.rejection_reason,
            Some(Some("blurry image".to_owned()))
        );
        assert_eq!(patch.verified_at, Some(None));
    }

    #[test]
    fn pending_patch_clears_resolution() {
        let patch = UpdateUser::from_verification_status(
            VerificationStatus::Pending,
            Some("ignored".to_owned()),
        );
        assert_eq!(patch.is_verified, Some(false));
        assert_eq!(patch.rejection_reason, Some(None));
        assert_eq!(patch.verified_at, Some(None));
    }
}
