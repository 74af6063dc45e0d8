//! Filtering options for database queries.

mod messages;
mod stories;
mod users;

pub use messages::{ChatHistoryFilter, ConversationFilter};
pub use stories::StoryFeedFilter;
pub use users::UserSearchFilter;
