//! Time-related helper utilities and traits for consistent time handling across models.
//!
//! This module provides time handling capabilities through traits designed for database models.

use jiff::{Span, Timestamp};

/// Common time span constants used throughout the application.
pub mod constants {
    /// Number of hours within which something counts as "recently created".
    pub const RECENTLY_CREATED_HOURS: i64 = 24;
}

/// Returns whether a timestamp is within the specified span from now.
pub fn is_within_span(timestamp: Timestamp, span: Span) -> bool {
    timestamp >= Timestamp::now() - span
}

/// Trait for models that have creation timestamps.
pub trait HasCreatedAt {
    /// Returns the creation timestamp.
    fn created_at(&self) -> Timestamp;

    /// Returns whether the entity was created recently.
    fn is_recently_created(&self) -> bool {
        self.was_created_within(Span::new().hours(constants::RECENTLY_CREATED_HOURS))
    }

    /// Returns whether the entity was created within the specified span.
    fn was_created_within(&self, span: Span) -> bool {
        is_within_span(self.created_at(), span)
    }

    /// Returns the age of the entity since creation.
    fn creation_age(&self) -> Span {
        Timestamp::now() - self.created_at()
    }
}

/// Trait for models that have optional expiration timestamps.
pub trait HasExpiresAt {
    /// Returns the expiration timestamp, if one is set.
    fn expires_at(&self) -> Option<Timestamp>;

    /// Returns whether the entity has expired.
    ///
    /// Entities without an expiration timestamp never expire.
    fn is_expired(&self) -> bool {
        self.expires_at()
            .is_some_and(|expires_at| expires_at <= Timestamp::now())
    }

    /// Returns whether the entity is still readable (not expired).
    fn is_active(&self) -> bool {
        !self.is_expired()
    }

    /// Returns the time remaining until expiration, if any.
    fn time_until_expiry(&self) -> Option<Span> {
        let now = Timestamp::now();
        self.expires_at()
            .and_then(|expires_at| (expires_at > now).then(|| expires_at - now))
    }
}
