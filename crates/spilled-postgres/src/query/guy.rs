//! Guy repository for managing community-maintained profiles.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use super::user::UserRepository;
use crate::model::{Guy, NewGuy, UpdateGuy};
use crate::types::constants::database::MAX_RANKING_LIMIT;
use crate::types::validate;
use crate::{PgConnection, PgError, PgResult, schema};

/// A guy profile together with the number of stories posted about it.
#[derive(Debug, Clone, PartialEq)]
pub struct GuyWithStoryCount {
    /// The profile itself.
    pub guy: Guy,
    /// Number of stories attached to the profile.
    pub story_count: i64,
}

/// Repository for guy profile database operations.
///
/// Handles profile lifecycle, discovery searches, and popularity rankings.
pub trait GuyRepository {
    /// Creates a new guy profile.
    ///
    /// The display name must be non-empty and the age, when given, must be
    /// plausible. The creating user must exist.
    fn create_guy(&mut self, new_guy: NewGuy) -> impl Future<Output = PgResult<Guy>> + Send;

    /// Finds a guy profile by its unique identifier.
    fn find_guy_by_id(
        &mut self,
        guy_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Guy>>> + Send;

    /// Updates a guy profile with new information.
    ///
    /// Only fields set to `Some(value)` will be modified. Returns `None`
    /// if no row matched.
    fn update_guy(
        &mut self,
        guy_id: Uuid,
        updates: UpdateGuy,
    ) -> impl Future<Output = PgResult<Option<Guy>>> + Send;

    /// Lists guy profiles with pagination support, newest first.
    fn list_guys(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Guy>>> + Send;

    /// Searches guy profiles by name, phone, location, or socials.
    ///
    /// Matching is case-insensitive and partial.
    fn search_guys(
        &mut self,
        search: &str,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Guy>>> + Send;

    /// Lists guy profiles together with their story counts, newest first.
    ///
    /// Profiles without stories appear with a count of zero.
    fn find_guys_with_story_counts(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<GuyWithStoryCount>>> + Send;

    /// Finds the most storied profiles.
    ///
    /// Only profiles with at least one story qualify, ordered by story
    /// count descending. The limit is clamped to a bounded ranking size.
    fn find_popular_guys(
        &mut self,
        limit: i64,
    ) -> impl Future<Output = PgResult<Vec<GuyWithStoryCount>>> + Send;

    /// Deletes a guy profile together with its stories and their comments.
    ///
    /// Runs in a single transaction; any failure rolls back all deletions.
    /// Returns whether the profile row was removed.
    fn delete_guy_with_stories(
        &mut self,
        guy_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Counts all guy profiles.
    fn count_guys(&mut self) -> impl Future<Output = PgResult<i64>> + Send;
}

impl GuyRepository for PgConnection {
    async fn create_guy(&mut self, mut new_guy: NewGuy) -> PgResult<Guy> {
        use schema::guys;

        // Normalize fields: trim whitespace
        new_guy.display_name = new_guy.display_name.trim().to_owned();
        new_guy.phone_number = new_guy.phone_number.map(|phone| phone.trim().to_owned());

        validate::require_non_empty("display_name", &new_guy.display_name)?;
        if let Some(age) = new_guy.age {
            validate::validate_age(age)?;
        }

        if !self.user_exists(new_guy.created_by).await? {
            return Err(PgError::NotFound {
                entity: "user",
                id: new_guy.created_by,
            });
        }

        diesel::insert_into(guys::table)
            .values(&new_guy)
            .returning(Guy::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_guy_by_id(&mut self, guy_id: Uuid) -> PgResult<Option<Guy>> {
        use schema::guys::{self, dsl};

        guys::table
            .filter(dsl::id.eq(guy_id))
            .select(Guy::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn update_guy(&mut self, guy_id: Uuid, mut updates: UpdateGuy) -> PgResult<Option<Guy>> {
        use schema::guys::{self, dsl};

        if let Some(name) = updates.display_name.as_mut() {
            *name = name.trim().to_owned();
            validate::require_non_empty("display_name", name)?;
        }
        if let Some(Some(age)) = updates.age {
            validate::validate_age(age)?;
        }

        diesel::update(guys::table.filter(dsl::id.eq(guy_id)))
            .set(&updates)
            .returning(Guy::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_guys(&mut self, pagination: Pagination) -> PgResult<Vec<Guy>> {
        use schema::guys::{self, dsl};

        guys::table
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Guy::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn search_guys(&mut self, search: &str, pagination: Pagination) -> PgResult<Vec<Guy>> {
        use schema::guys::{self, dsl};

        let search_pattern = format!("%{}%", search.trim());

        guys::table
            .filter(
                dsl::display_name
                    .ilike(search_pattern.clone())
                    .or(dsl::phone_number.ilike(search_pattern.clone()))
                    .or(dsl::location.ilike(search_pattern.clone()))
                    .or(dsl::socials.ilike(search_pattern)),
            )
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Guy::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_guys_with_story_counts(
        &mut self,
        pagination: Pagination,
    ) -> PgResult<Vec<GuyWithStoryCount>> {
        use schema::{guys, stories};

        let rows: Vec<(Guy, Option<i64>)> = guys::table
            .order(guys::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select((
                Guy::as_select(),
                stories::table
                    .filter(stories::guy_id.eq(guys::id))
                    .count()
                    .single_value(),
            ))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(rows
            .into_iter()
            .map(|(guy, story_count)| GuyWithStoryCount {
                guy,
                story_count: story_count.unwrap_or(0),
            })
            .collect())
    }

    async fn find_popular_guys(&mut self, limit: i64) -> PgResult<Vec<GuyWithStoryCount>> {
        use schema::{guys, stories};

        let limit = limit.clamp(1, MAX_RANKING_LIMIT);

        let rows: Vec<(Guy, Option<i64>)> = guys::table
            .filter(diesel::dsl::exists(
                stories::table.filter(stories::guy_id.eq(guys::id)),
            ))
            .order(
                stories::table
                    .filter(stories::guy_id.eq(guys::id))
                    .count()
                    .single_value()
                    .desc(),
            )
            .limit(limit)
            .select((
                Guy::as_select(),
                stories::table
                    .filter(stories::guy_id.eq(guys::id))
                    .count()
                    .single_value(),
            ))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(rows
            .into_iter()
            .map(|(guy, story_count)| GuyWithStoryCount {
                guy,
                story_count: story_count.unwrap_or(0),
            })
            .collect())
    }

    async fn delete_guy_with_stories(&mut self, guy_id: Uuid) -> PgResult<bool> {
        use schema::{comments, guys, stories};

        self.transaction(|conn| {
            async move {
                let story_ids: Vec<Uuid> = stories::table
                    .filter(stories::guy_id.eq(guy_id))
                    .select(stories::id)
                    .load(conn)
                    .await?;

                diesel::delete(comments::table.filter(comments::story_id.eq_any(&story_ids)))
                    .execute(conn)
                    .await?;

                diesel::delete(stories::table.filter(stories::guy_id.eq(guy_id)))
                    .execute(conn)
                    .await?;

                let removed = diesel::delete(guys::table.filter(guys::id.eq(guy_id)))
                    .execute(conn)
                    .await?;

                Ok(removed > 0)
            }
            .scope_boxed()
        })
        .await
    }

    async fn count_guys(&mut self) -> PgResult<i64> {
        use schema::guys;

        guys::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }
}
