//! Constants used throughout the application.

/// Database-related constants.
pub mod database {
    /// Default pagination limit.
    pub const DEFAULT_PAGE_SIZE: i64 = 50;

    /// Maximum pagination limit.
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Maximum number of entries returned by ranking queries.
    pub const MAX_RANKING_LIMIT: i64 = 50;
}

/// Constants related to guy profiles.
pub mod guy {
    /// Minimum accepted age.
    pub const AGE_MIN: i32 = 0;

    /// Maximum accepted age.
    pub const AGE_MAX: i32 = 150;
}

/// Constants related to stories.
pub mod story {
    /// Maximum story body length in characters.
    pub const BODY_LENGTH_MAX: usize = 1000;

    /// Number of days a story counts towards the trending window.
    pub const TRENDING_WINDOW_DAYS: i64 = 7;

    /// Number of days within which a story is considered "recent".
    pub const RECENT_DAYS: i64 = 7;
}

/// Constants related to comments.
pub mod comment {
    /// Maximum comment body length in characters.
    pub const BODY_LENGTH_MAX: usize = 500;

    /// Number of days within which a comment is considered "recent".
    pub const RECENT_DAYS: i64 = 7;
}

/// Constants related to direct messages.
pub mod message {
    /// Maximum message body length in characters.
    pub const BODY_LENGTH_MAX: usize = 1000;

    /// Number of days a message remains readable by default.
    pub const DEFAULT_EXPIRY_DAYS: i64 = 7;
}
