//! Database query repositories for all entities in the system.
//!
//! This module contains repository implementations that provide high-level
//! database operations for all entities, encapsulating common patterns
//! and providing type-safe interfaces.
//!
//! # Pagination
//!
//! All queries that may return large result sets use the [`Pagination`] struct
//! to provide consistent, bounded pagination across the system. Listing
//! operations that also report totals wrap their rows in a [`Page`].

pub mod comment;
pub mod guy;
pub mod message;
pub mod story;
pub mod user;

pub use comment::{CommentRepository, CommentStats, CommentWithAuthor};
pub use guy::{GuyRepository, GuyWithStoryCount};
pub use message::{ConversationSummary, MessageRepository, MessageStats};
use serde::{Deserialize, Serialize};
pub use story::{FeedStory, StoryRepository, StoryStats};
pub use user::{UserRepository, UserStats};

use crate::types::constants::database::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            // Ensure limit is between 1 and MAX_PAGE_SIZE
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            // Ensure offset is non-negative
            offset: offset.max(0),
        }
    }

    /// Creates pagination from page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        Self::new(page_size, (page - 1) * page_size)
    }

    /// Gets the current page number (1-based).
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit) + 1
    }

    /// Gets the page size.
    pub fn page_size(&self) -> i64 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, 0)
    }
}

/// One page of results together with the unpaginated total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records on this page.
    pub items: Vec<T>,
    /// Total number of matching records across all pages.
    pub total: i64,
}

impl<T> Page<T> {
    /// Creates a new page.
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    /// Returns whether records exist beyond this page.
    pub fn has_more(&self, pagination: &Pagination) -> bool {
        pagination.offset + (self.items.len() as i64) < self.total
    }

    /// Returns the number of pages at the given page size.
    pub fn total_pages(&self, page_size: i64) -> i64 {
        let page_size = page_size.max(1);
        (self.total + page_size - 1) / page_size
    }

    /// Maps the page items, preserving the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_new() {
        let pagination = Pagination::new(25, 100);
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.offset, 100);
    }

    #[test]
    fn pagination_bounds_checking() {
        // Test limit bounds
        let pagination = Pagination::new(0, 10);
        assert_eq!(pagination.limit, 1); // Should be clamped to minimum 1

        let pagination = Pagination::new(500, 10);
        assert_eq!(pagination.limit, MAX_PAGE_SIZE); // Should be clamped to maximum

        // Test offset bounds
        let pagination = Pagination::new(10, -5);
        assert_eq!(pagination.offset, 0); // Should be clamped to minimum 0
    }

    #[test]
    fn pagination_from_page() {
        // Test first page
        let pagination = Pagination::from_page(1, 20);
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 0);

        // Test second page
        let pagination = Pagination::from_page(2, 20);
        assert_eq!(pagination.limit, 20);
        assert_eq!(pagination.offset, 20);

        // Test third page
        let pagination = Pagination::from_page(3, 10);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 20);

        // Test bounds checking
        let pagination = Pagination::from_page(0, 20); // Should be clamped to page 1
        assert_eq!(pagination.offset, 0);

        let pagination = Pagination::from_page(1, 0); // Should be clamped to page_size 1
        assert_eq!(pagination.limit, 1);
    }

    #[test]
    fn pagination_page_number() {
        let pagination = Pagination::new(20, 0);
        assert_eq!(pagination.page_number(), 1);

        let pagination = Pagination::new(20, 20);
        assert_eq!(pagination.page_number(), 2);

        let pagination = Pagination::new(10, 25);
        assert_eq!(pagination.page_number(), 3); // 25 / 10 + 1 = 3
    }

    #[test]
    fn page_has_more() {
        let page = Page::new(vec![1, 2, 3], 10);
        assert!(page.has_more(&Pagination::new(3, 0)));

        let last = Page::new(vec![1], 4);
        assert!(!last.has_more(&Pagination::new(3, 3)));

        let empty: Page<i32> = Page::new(vec![], 0);
        assert!(!empty.has_more(&Pagination::default()));
    }

    #[test]
    fn page_total_pages() {
        let page: Page<i32> = Page::new(vec![], 45);
        assert_eq!(page.total_pages(10), 5);
        assert_eq!(page.total_pages(45), 1);
        assert_eq!(page.total_pages(100), 1);

        let empty: Page<i32> = Page::new(vec![], 0);
        assert_eq!(empty.total_pages(10), 0);
    }

    #[test]
    fn page_map_preserves_total() {
        let page = Page::new(vec![1, 2, 3], 7);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1", "2", "3"]);
        assert_eq!(mapped.total, 7);
    }
}
