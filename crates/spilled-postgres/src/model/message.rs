//! Direct message model for PostgreSQL database operations.
//!
//! Messages are one-to-one and expire. Message bodies are immutable once
//! sent, so there is no update changeset.
//!
//! ## Models
//!
//! - [`Message`] - Main direct message model
//! - [`NewMessage`] - Data structure for sending new messages

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::messages;
use crate::types::{HasCreatedAt, HasExpiresAt};

/// Direct message between two users.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// User who sent the message.
    pub sender_id: Uuid,
    /// User who receives the message.
    pub receiver_id: Uuid,
    /// Message text.
    pub body: String,
    /// Instant after which the message is hidden. `None` never expires.
    pub expires_at: Option<Timestamp>,
    /// Timestamp when the message was sent.
    pub created_at: Timestamp,
}

/// Data for sending a new message.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMessage {
    /// User who sends the message.
    pub sender_id: Uuid,
    /// User who receives the message.
    pub receiver_id: Uuid,
    /// Message text.
    pub body: String,
    /// Instant after which the message is hidden. `None` never expires.
    pub expires_at: Option<Timestamp>,
}

impl Message {
    /// Returns whether the given user is the sender or the receiver.
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// Returns the other participant from the given user's perspective.
    ///
    /// Returns `None` when the user is not a participant.
    pub fn counterparty_of(&self, user_id: Uuid) -> Option<Uuid> {
        if self.sender_id == user_id {
            Some(self.receiver_id)
        } else if self.receiver_id == user_id {
            Some(self.sender_id)
        } else {
            None
        }
    }

    /// Returns whether the given user sent this message.
    pub fn is_outbound_for(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id
    }
}

impl HasCreatedAt for Message {
    fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }
}

impl HasExpiresAt for Message {
    fn expires_at(&self) -> Option<jiff::Timestamp> {
        self.expires_at.map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;

    use super::*;

    fn sample_message(expires_at: Option<jiff::Timestamp>) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            receiver_id: Uuid::new_v4(),
            body: "hey, are you around?".to_owned(),
            expires_at: expires_at.map(Into::into),
            created_at: jiff::Timestamp::now().into(),
        }
    }

    #[test]
    fn participants() {
        let message = sample_message(None);
        assert!(message.involves(message.sender_id));
        assert!(message.involves(message.receiver_id));
        assert!(!message.involves(Uuid::new_v4()));
    }

    #[test]
    fn counterparty_resolution() {
        let message = sample_message(None);
        assert_eq!(
            message.counterparty_of(message.sender_id),
            Some(message.receiver_id)
        );
        assert_eq!(
            message.counterparty_of(message.receiver_id),
            Some(message.sender_id)
        );
        assert_eq!(message.counterparty_of(Uuid::new_v4()), None);
    }

    #[test]
    fn direction() {
        let message = sample_message(None);
        assert!(message.is_outbound_for(message.sender_id));
        assert!(!message.is_outbound_for(message.receiver_id));
    }

    #[test]
    fn expiry_states() {
        let now = jiff::Timestamp::now();

        let permanent = sample_message(None);
        assert!(!permanent.is_expired());
        assert!(permanent.is_active());
        assert!(permanent.time_until_expiry().is_none());

        let live = sample_message(Some(now + 1.hour()));
        assert!(!live.is_expired());
        assert!(live.time_until_expiry().is_some());

        let expired = sample_message(Some(now - 1.hour()));
        assert!(expired.is_expired());
        assert!(!expired.is_active());
        assert!(expired.time_until_expiry().is_none());
    }
}
