//! Messages table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Messages table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum MessageConstraints {
    // Message validation constraints
    #[strum(serialize = "messages_body_not_empty")]
    BodyNotEmpty,
    #[strum(serialize = "messages_body_length_max")]
    BodyLengthMax,

    // Message chronological constraints
    #[strum(serialize = "messages_expires_after_created")]
    ExpiresAfterCreated,

    // Message business logic constraints
    #[strum(serialize = "messages_no_self_send")]
    NoSelfSend,

    // Message reference constraints
    #[strum(serialize = "messages_sender_id_fkey")]
    SenderIdFkey,
    #[strum(serialize = "messages_receiver_id_fkey")]
    ReceiverIdFkey,
}

impl MessageConstraints {
    /// Creates a new [`MessageConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            MessageConstraints::BodyNotEmpty | MessageConstraints::BodyLengthMax => {
                ConstraintCategory::Validation
            }

            MessageConstraints::ExpiresAfterCreated => ConstraintCategory::Chronological,

            MessageConstraints::NoSelfSend => ConstraintCategory::BusinessLogic,

            MessageConstraints::SenderIdFkey | MessageConstraints::ReceiverIdFkey => {
                ConstraintCategory::Reference
            }
        }
    }
}

impl From<MessageConstraints> for String {
    #[inline]
    fn from(val: MessageConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for MessageConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
