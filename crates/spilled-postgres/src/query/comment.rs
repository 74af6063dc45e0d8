//! Comment repository for managing story replies.

use std::collections::HashMap;
use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::{Span, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRepository;
use super::{Page, Pagination};
use crate::model::{Comment, NewComment, UpdateComment};
use crate::types::constants::comment;
use crate::types::validate;
use crate::{PgConnection, PgError, PgResult, schema};

/// A comment joined with its author's account nickname.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentWithAuthor {
    /// The comment itself.
    pub comment: Comment,
    /// Account nickname of the author.
    pub author_nickname: String,
}

/// Aggregate counts over the comment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStats {
    /// Number of comments overall.
    pub total_comments: i64,
    /// Number of comments posted within the recent window.
    pub comments_last_week: i64,
    /// Number of comments posted anonymously.
    pub anonymous_comments: i64,
}

/// Repository for comment database operations.
///
/// Handles comment lifecycle and per-story listings in thread order.
pub trait CommentRepository {
    /// Creates a new comment.
    ///
    /// The body must be non-empty and within the length limit, and both
    /// the story and the author must exist.
    fn create_comment(
        &mut self,
        new_comment: NewComment,
    ) -> impl Future<Output = PgResult<Comment>> + Send;

    /// Finds a comment by its unique identifier.
    fn find_comment_by_id(
        &mut self,
        comment_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Comment>>> + Send;

    /// Updates a comment with new information.
    ///
    /// Only fields set to `Some(value)` will be modified. Returns `None`
    /// if no row matched.
    fn update_comment(
        &mut self,
        comment_id: Uuid,
        updates: UpdateComment,
    ) -> impl Future<Output = PgResult<Option<Comment>>> + Send;

    /// Deletes a comment. Returns whether a row was removed.
    fn delete_comment(
        &mut self,
        comment_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists the comments of a story with their total count.
    ///
    /// Joins each comment to its author; comments whose author or story no
    /// longer resolves are excluded. Supports optional case-insensitive
    /// search over body and author nickname. Results are ordered oldest
    /// first so threads read chronologically.
    fn find_comments_by_story(
        &mut self,
        story_id: Uuid,
        search: Option<&str>,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Page<CommentWithAuthor>>> + Send;

    /// Returns the comment count for each requested story.
    ///
    /// Every requested id is present in the result, with zero for stories
    /// without comments.
    fn get_comment_counts_by_story_ids(
        &mut self,
        story_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<HashMap<Uuid, i64>>> + Send;

    /// Counts the comments of a story.
    fn count_comments_by_story(
        &mut self,
        story_id: Uuid,
    ) -> impl Future<Output = PgResult<i64>> + Send;

    /// Retrieves aggregate comment counts for dashboards.
    fn get_comment_stats(&mut self) -> impl Future<Output = PgResult<CommentStats>> + Send;
}

impl CommentRepository for PgConnection {
    async fn create_comment(&mut self, mut new_comment: NewComment) -> PgResult<Comment> {
        use schema::{comments, stories};

        // Normalize fields: trim whitespace, drop empty nicknames
        new_comment.body = new_comment.body.trim().to_owned();
        new_comment.nickname = new_comment
            .nickname
            .map(|nickname| nickname.trim().to_owned())
            .filter(|nickname| !nickname.is_empty());

        validate::require_non_empty("body", &new_comment.body)?;
        validate::validate_length_max("body", &new_comment.body, comment::BODY_LENGTH_MAX)?;

        let story_count: i64 = stories::table
            .filter(stories::id.eq(new_comment.story_id))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;
        if story_count == 0 {
            return Err(PgError::NotFound {
                entity: "story",
                id: new_comment.story_id,
            });
        }

        if !self.user_exists(new_comment.user_id).await? {
            return Err(PgError::NotFound {
                entity: "user",
                id: new_comment.user_id,
            });
        }

        diesel::insert_into(comments::table)
            .values(&new_comment)
            .returning(Comment::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_comment_by_id(&mut self, comment_id: Uuid) -> PgResult<Option<Comment>> {
        use schema::comments::{self, dsl};

        comments::table
            .filter(dsl::id.eq(comment_id))
            .select(Comment::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn update_comment(
        &mut self,
        comment_id: Uuid,
        mut updates: UpdateComment,
    ) -> PgResult<Option<Comment>> {
        use schema::comments::{self, dsl};

        if let Some(body) = updates.body.as_mut() {
            *body = body.trim().to_owned();
            validate::require_non_empty("body", body)?;
            validate::validate_length_max("body", body, comment::BODY_LENGTH_MAX)?;
        }

        diesel::update(comments::table.filter(dsl::id.eq(comment_id)))
            .set(&updates)
            .returning(Comment::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_comment(&mut self, comment_id: Uuid) -> PgResult<bool> {
        use schema::comments::{self, dsl};

        let removed = diesel::delete(comments::table.filter(dsl::id.eq(comment_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(removed > 0)
    }

    async fn find_comments_by_story(
        &mut self,
        story_id: Uuid,
        search: Option<&str>,
        pagination: Pagination,
    ) -> PgResult<Page<CommentWithAuthor>> {
        use schema::{comments, stories, users};

        let search_pattern = search.map(|search| format!("%{}%", search.trim()));

        let mut query = comments::table
            .inner_join(users::table)
            .inner_join(stories::table)
            .filter(comments::story_id.eq(story_id))
            .into_boxed();
        let mut count_query = comments::table
            .inner_join(users::table)
            .inner_join(stories::table)
            .filter(comments::story_id.eq(story_id))
            .into_boxed();

        if let Some(pattern) = &search_pattern {
            query = query.filter(
                comments::body
                    .ilike(pattern.clone())
                    .or(users::nickname.ilike(pattern.clone())),
            );
            count_query = count_query.filter(
                comments::body
                    .ilike(pattern.clone())
                    .or(users::nickname.ilike(pattern.clone())),
            );
        }

        let total: i64 = count_query
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        // Oldest first: threads read top to bottom
        let rows: Vec<(Comment, String)> = query
            .order(comments::created_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select((Comment::as_select(), users::nickname))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let items = rows
            .into_iter()
            .map(|(comment, author_nickname)| CommentWithAuthor {
                comment,
                author_nickname,
            })
            .collect();

        Ok(Page::new(items, total))
    }

    async fn get_comment_counts_by_story_ids(
        &mut self,
        story_ids: &[Uuid],
    ) -> PgResult<HashMap<Uuid, i64>> {
        use schema::comments::{self, dsl};

        let mut counts: HashMap<Uuid, i64> = story_ids.iter().map(|id| (*id, 0)).collect();
        if story_ids.is_empty() {
            return Ok(counts);
        }

        let rows: Vec<(Uuid, i64)> = comments::table
            .filter(dsl::story_id.eq_any(story_ids))
            .group_by(dsl::story_id)
            .select((dsl::story_id, diesel::dsl::count_star()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        for (story_id, count) in rows {
            counts.insert(story_id, count);
        }

        Ok(counts)
    }

    async fn count_comments_by_story(&mut self, story_id: Uuid) -> PgResult<i64> {
        use schema::comments::{self, dsl};

        comments::table
            .filter(dsl::story_id.eq(story_id))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn get_comment_stats(&mut self) -> PgResult<CommentStats> {
        use schema::comments::{self, dsl};

        let week_start = Timestamp::now() - Span::new().days(comment::RECENT_DAYS);
        let week_start = jiff_diesel::Timestamp::from(week_start);

        let total_comments: i64 = comments::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let comments_last_week: i64 = comments::table
            .filter(dsl::created_at.gt(week_start))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let anonymous_comments: i64 = comments::table
            .filter(dsl::is_anonymous.eq(true))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(CommentStats {
            total_comments,
            comments_last_week,
            anonymous_comments,
        })
    }
}
