//! Contains constraints, enumerations and other custom types.

pub mod constants;
mod constraints;
mod enums;
mod filtering;
mod sorting;
mod utilities;
pub mod validate;

pub use constraints::{
    CommentConstraints, ConstraintCategory, ConstraintViolation, GuyConstraints,
    MessageConstraints, StoryConstraints, UserConstraints,
};
pub use enums::{IdDocumentType, StoryTag, VerificationStatus};
pub use filtering::{ChatHistoryFilter, ConversationFilter, StoryFeedFilter, UserSearchFilter};
pub use sorting::SortDirection;
pub use utilities::{HasCreatedAt, HasExpiresAt, is_within_span};
