//! Story repository for managing experience reports.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff::{Span, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRepository;
use super::{Page, Pagination};
use crate::model::{NewStory, Story, UpdateStory};
use crate::types::constants::database::MAX_RANKING_LIMIT;
use crate::types::constants::story;
use crate::types::{SortDirection, StoryFeedFilter, validate};
use crate::{PgConnection, PgError, PgResult, schema};

/// A story joined with its display context for the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedStory {
    /// The story itself.
    pub story: Story,
    /// Display name of the profile the story is about.
    pub guy_name: String,
    /// Account nickname of the author.
    pub author_nickname: String,
    /// Number of comments on the story.
    pub comment_count: i64,
}

/// Aggregate counts over the story table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStats {
    /// Number of stories overall.
    pub total_stories: i64,
    /// Number of stories posted within the recent window.
    pub stories_last_week: i64,
    /// Number of stories posted anonymously.
    pub anonymous_stories: i64,
}

/// Repository for story database operations.
///
/// Handles story lifecycle, the main feed read path, and trending rankings.
pub trait StoryRepository {
    /// Creates a new story.
    ///
    /// The body must be non-empty and within the length limit, and the
    /// author must be a verified user.
    fn create_story(
        &mut self,
        new_story: NewStory,
    ) -> impl Future<Output = PgResult<Story>> + Send;

    /// Finds a story by its unique identifier.
    fn find_story_by_id(
        &mut self,
        story_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Story>>> + Send;

    /// Updates a story with new information.
    ///
    /// Only fields set to `Some(value)` will be modified. Returns `None`
    /// if no row matched.
    fn update_story(
        &mut self,
        story_id: Uuid,
        updates: UpdateStory,
    ) -> impl Future<Output = PgResult<Option<Story>>> + Send;

    /// Lists stories about the given profile, newest first.
    fn list_stories_by_guy(
        &mut self,
        guy_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Story>>> + Send;

    /// Lists stories posted by the given user, newest first.
    fn list_stories_by_user(
        &mut self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Story>>> + Send;

    /// Fetches the story feed with display context and a total count.
    ///
    /// Joins each story to its profile and author; stories whose profile or
    /// author no longer resolves are excluded. All filter predicates are
    /// combined with AND. The sort direction applies to creation time and
    /// defaults to newest first.
    fn fetch_stories_feed(
        &mut self,
        filter: &StoryFeedFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Page<FeedStory>>> + Send;

    /// Finds the most commented stories of the trending window.
    ///
    /// Only stories created within the window qualify, ordered by comment
    /// count descending. The limit is clamped to a bounded ranking size.
    fn get_trending_stories(
        &mut self,
        limit: i64,
    ) -> impl Future<Output = PgResult<Vec<FeedStory>>> + Send;

    /// Deletes a story together with its comments.
    ///
    /// Runs in a single transaction. Returns whether the story row was
    /// removed.
    fn delete_story_with_comments(
        &mut self,
        story_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Deletes several stories together with their comments.
    ///
    /// Runs in a single transaction. Returns the number of stories removed.
    fn bulk_delete_stories(
        &mut self,
        story_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<usize>> + Send;

    /// Retrieves aggregate story counts for dashboards.
    fn get_story_stats(&mut self) -> impl Future<Output = PgResult<StoryStats>> + Send;
}

impl StoryRepository for PgConnection {
    async fn create_story(&mut self, mut new_story: NewStory) -> PgResult<Story> {
        use schema::stories;

        // Normalize fields: trim whitespace, drop empty nicknames
        new_story.body = new_story.body.trim().to_owned();
        new_story.nickname = new_story
            .nickname
            .map(|nickname| nickname.trim().to_owned())
            .filter(|nickname| !nickname.is_empty());

        validate::require_non_empty("body", &new_story.body)?;
        validate::validate_length_max("body", &new_story.body, story::BODY_LENGTH_MAX)?;

        let author = self
            .find_user_by_id(new_story.user_id)
            .await?
            .ok_or(PgError::NotFound {
                entity: "user",
                id: new_story.user_id,
            })?;
        if !author.can_post_stories() {
            return Err(PgError::Invalid {
                field: "user_id".into(),
                reason: "must be a verified user".into(),
            });
        }

        diesel::insert_into(stories::table)
            .values(&new_story)
            .returning(Story::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_story_by_id(&mut self, story_id: Uuid) -> PgResult<Option<Story>> {
        use schema::stories::{self, dsl};

        stories::table
            .filter(dsl::id.eq(story_id))
            .select(Story::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn update_story(
        &mut self,
        story_id: Uuid,
        mut updates: UpdateStory,
    ) -> PgResult<Option<Story>> {
        use schema::stories::{self, dsl};

        if let Some(body) = updates.body.as_mut() {
            *body = body.trim().to_owned();
            validate::require_non_empty("body", body)?;
            validate::validate_length_max("body", body, story::BODY_LENGTH_MAX)?;
        }

        diesel::update(stories::table.filter(dsl::id.eq(story_id)))
            .set(&updates)
            .returning(Story::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_stories_by_guy(
        &mut self,
        guy_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<Story>> {
        use schema::stories::{self, dsl};

        stories::table
            .filter(dsl::guy_id.eq(guy_id))
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Story::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_stories_by_user(
        &mut self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<Story>> {
        use schema::stories::{self, dsl};

        stories::table
            .filter(dsl::user_id.eq(user_id))
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Story::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn fetch_stories_feed(
        &mut self,
        filter: &StoryFeedFilter,
        pagination: Pagination,
    ) -> PgResult<Page<FeedStory>> {
        use schema::{comments, guys, stories, users};

        let mut query = stories::table
            .inner_join(guys::table)
            .inner_join(users::table)
            .into_boxed();
        let mut count_query = stories::table
            .inner_join(guys::table)
            .inner_join(users::table)
            .into_boxed();

        if let Some(search) = filter.search.as_deref() {
            let search_pattern = format!("%{}%", search.trim());
            query = query.filter(
                stories::body
                    .ilike(search_pattern.clone())
                    .or(guys::display_name.ilike(search_pattern.clone()))
                    .or(users::nickname.ilike(search_pattern.clone())),
            );
            count_query = count_query.filter(
                stories::body
                    .ilike(search_pattern.clone())
                    .or(guys::display_name.ilike(search_pattern.clone()))
                    .or(users::nickname.ilike(search_pattern)),
            );
        }

        if let Some(tag) = filter.tag {
            query = query.filter(stories::tags.contains(vec![tag]));
            count_query = count_query.filter(stories::tags.contains(vec![tag]));
        }

        if let Some(guy_id) = filter.guy_id {
            query = query.filter(stories::guy_id.eq(guy_id));
            count_query = count_query.filter(stories::guy_id.eq(guy_id));
        }

        if let Some(user_id) = filter.user_id {
            query = query.filter(stories::user_id.eq(user_id));
            count_query = count_query.filter(stories::user_id.eq(user_id));
        }

        if let Some(created_after) = filter.created_after {
            let bound = jiff_diesel::Timestamp::from(created_after);
            query = query.filter(stories::created_at.ge(bound));
            count_query = count_query.filter(stories::created_at.ge(bound));
        }

        if let Some(created_before) = filter.created_before {
            let bound = jiff_diesel::Timestamp::from(created_before);
            query = query.filter(stories::created_at.le(bound));
            count_query = count_query.filter(stories::created_at.le(bound));
        }

        query = match filter.sort {
            SortDirection::Asc => query.order(stories::created_at.asc()),
            SortDirection::Desc => query.order(stories::created_at.desc()),
        };

        let total: i64 = count_query
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let rows: Vec<(Story, String, String, Option<i64>)> = query
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select((
                Story::as_select(),
                guys::display_name,
                users::nickname,
                comments::table
                    .filter(comments::story_id.eq(stories::id))
                    .count()
                    .single_value(),
            ))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let items = rows
            .into_iter()
            .map(|(story, guy_name, author_nickname, comment_count)| FeedStory {
                story,
                guy_name,
                author_nickname,
                comment_count: comment_count.unwrap_or(0),
            })
            .collect();

        Ok(Page::new(items, total))
    }

    async fn get_trending_stories(&mut self, limit: i64) -> PgResult<Vec<FeedStory>> {
        use schema::{comments, guys, stories, users};

        let limit = limit.clamp(1, MAX_RANKING_LIMIT);
        let window_start = Timestamp::now() - Span::new().days(story::TRENDING_WINDOW_DAYS);
        let window_start = jiff_diesel::Timestamp::from(window_start);

        let rows: Vec<(Story, String, String, Option<i64>)> = stories::table
            .inner_join(guys::table)
            .inner_join(users::table)
            .filter(stories::created_at.gt(window_start))
            .order(
                comments::table
                    .filter(comments::story_id.eq(stories::id))
                    .count()
                    .single_value()
                    .desc(),
            )
            .limit(limit)
            .select((
                Story::as_select(),
                guys::display_name,
                users::nickname,
                comments::table
                    .filter(comments::story_id.eq(stories::id))
                    .count()
                    .single_value(),
            ))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(rows
            .into_iter()
            .map(|(story, guy_name, author_nickname, comment_count)| FeedStory {
                story,
                guy_name,
                author_nickname,
                comment_count: comment_count.unwrap_or(0),
            })
            .collect())
    }

    async fn delete_story_with_comments(&mut self, story_id: Uuid) -> PgResult<bool> {
        use schema::{comments, stories};

        self.transaction(|conn| {
            async move {
                diesel::delete(comments::table.filter(comments::story_id.eq(story_id)))
                    .execute(conn)
                    .await?;

                let removed = diesel::delete(stories::table.filter(stories::id.eq(story_id)))
                    .execute(conn)
                    .await?;

                Ok(removed > 0)
            }
            .scope_boxed()
        })
        .await
    }

    async fn bulk_delete_stories(&mut self, story_ids: &[Uuid]) -> PgResult<usize> {
        use schema::{comments, stories};

        if story_ids.is_empty() {
            return Ok(0);
        }

        let story_ids = story_ids.to_vec();
        self.transaction(|conn| {
            async move {
                diesel::delete(comments::table.filter(comments::story_id.eq_any(&story_ids)))
                    .execute(conn)
                    .await?;

                diesel::delete(stories::table.filter(stories::id.eq_any(&story_ids)))
                    .execute(conn)
                    .await
                    .map_err(PgError::from)
            }
            .scope_boxed()
        })
        .await
    }

    async fn get_story_stats(&mut self) -> PgResult<StoryStats> {
        use schema::stories::{self, dsl};

        let week_start = Timestamp::now() - Span::new().days(story::RECENT_DAYS);
        let week_start = jiff_diesel::Timestamp::from(week_start);

        let total_stories: i64 = stories::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let stories_last_week: i64 = stories::table
            .filter(dsl::created_at.gt(week_start))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let anonymous_stories: i64 = stories::table
            .filter(dsl::is_anonymous.eq(true))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(StoryStats {
            total_stories,
            stories_last_week,
            anonymous_stories,
        })
    }
}
