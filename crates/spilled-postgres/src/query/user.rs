//! User repository for managing accounts and identity verification.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Page, Pagination};
use crate::model::{NewUser, UpdateUser, User};
use crate::types::{UserSearchFilter, VerificationStatus, validate};
use crate::{PgConnection, PgError, PgResult, schema};

/// Aggregate counts over the user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Number of registered users.
    pub total_users: i64,
    /// Number of users that passed identity verification.
    pub verified_users: i64,
    /// Number of users whose verification is pending.
    pub pending_verification: i64,
    /// Number of users whose verification was rejected.
    pub rejected_verification: i64,
}

/// Repository for user database operations.
///
/// Handles account lifecycle management including registration, contact
/// lookups, and the identity-verification workflow.
pub trait UserRepository {
    /// Creates a new user account.
    ///
    /// Normalizes contact handles (trimmed, email lowercased) and rejects
    /// handles already registered to another user before inserting. The
    /// unique indexes remain the backstop under concurrent registration.
    fn create_user(&mut self, new_user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Finds a user by their unique identifier.
    fn find_user_by_id(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by email address.
    ///
    /// Email comparison is case-insensitive.
    fn find_user_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by phone number.
    fn find_user_by_phone(
        &mut self,
        phone: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Updates a user with new information.
    ///
    /// Applies partial updates to an existing user. Only fields set to
    /// `Some(value)` will be modified. Returns `None` if no row matched.
    fn update_user(
        &mut self,
        user_id: Uuid,
        updates: UpdateUser,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Moves a user to the given verification status.
    ///
    /// The derived columns are written in the same statement: approval sets
    /// `is_verified` and `verified_at` and clears the rejection reason,
    /// rejection stores the reason, pending clears both resolutions.
    fn update_verification_status(
        &mut self,
        user_id: Uuid,
        status: VerificationStatus,
        reason: Option<String>,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Moves several users to the given verification status at once.
    ///
    /// Applies the same column derivation as [`update_verification_status`]
    /// in a single statement. Returns the number of users updated.
    ///
    /// [`update_verification_status`]: UserRepository::update_verification_status
    fn bulk_update_verification_status(
        &mut self,
        user_ids: &[Uuid],
        status: VerificationStatus,
        reason: Option<String>,
    ) -> impl Future<Output = PgResult<usize>> + Send;

    /// Lists users in the given verification status with their total count.
    ///
    /// Supports optional case-insensitive search across nickname, email,
    /// and phone. Results are ordered oldest first so reviewers work the
    /// queue in submission order.
    fn find_users_by_verification_status(
        &mut self,
        status: VerificationStatus,
        filter: &UserSearchFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Page<User>>> + Send;

    /// Counts users in the given verification status.
    fn count_users_by_verification_status(
        &mut self,
        status: VerificationStatus,
    ) -> impl Future<Output = PgResult<i64>> + Send;

    /// Checks whether a user with the given id exists.
    fn user_exists(&mut self, user_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Checks whether an email address is already registered.
    fn email_exists(&mut self, email: &str) -> impl Future<Output = PgResult<bool>> + Send;

    /// Checks whether a phone number is already registered.
    fn phone_exists(&mut self, phone: &str) -> impl Future<Output = PgResult<bool>> + Send;

    /// Retrieves aggregate user counts for dashboards.
    ///
    /// The counts are issued as independent queries and may drift under
    /// concurrent writes; they are display-only.
    fn get_user_stats(&mut self) -> impl Future<Output = PgResult<UserStats>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user(&mut self, mut new_user: NewUser) -> PgResult<User> {
        use schema::users;

        // Normalize fields: trim whitespace, lowercase email
        new_user.nickname = new_user.nickname.trim().to_owned();
        new_user.email_address = new_user
            .email_address
            .map(|email| email.trim().to_lowercase());
        new_user.phone_number = new_user.phone_number.map(|phone| phone.trim().to_owned());

        validate::require_non_empty("nickname", &new_user.nickname)?;

        if let Some(email) = new_user.email_address.as_deref() {
            validate::validate_email(email)?;
            if self.email_exists(email).await? {
                return Err(PgError::AlreadyExists {
                    field: "email_address".into(),
                });
            }
        }

        if let Some(phone) = new_user.phone_number.as_deref() {
            validate::validate_phone(phone)?;
            if self.phone_exists(phone).await? {
                return Err(PgError::AlreadyExists {
                    field: "phone_number".into(),
                });
            }
        }

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_user_by_id(&mut self, user_id: Uuid) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_by_email(&mut self, email: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::email_address.eq(email.trim().to_lowercase()))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_by_phone(&mut self, phone: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::phone_number.eq(phone.trim()))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn update_user(&mut self, user_id: Uuid, updates: UpdateUser) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set(&updates)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn update_verification_status(
        &mut self,
        user_id: Uuid,
        status: VerificationStatus,
        reason: Option<String>,
    ) -> PgResult<Option<User>> {
        let patch = UpdateUser::from_verification_status(status, reason);
        self.update_user(user_id, patch).await
    }

    async fn bulk_update_verification_status(
        &mut self,
        user_ids: &[Uuid],
        status: VerificationStatus,
        reason: Option<String>,
    ) -> PgResult<usize> {
        use schema::users::{self, dsl};

        if user_ids.is_empty() {
            return Ok(0);
        }

        let patch = UpdateUser::from_verification_status(status, reason);

        diesel::update(users::table.filter(dsl::id.eq_any(user_ids)))
            .set(&patch)
            .execute(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_users_by_verification_status(
        &mut self,
        status: VerificationStatus,
        filter: &UserSearchFilter,
        pagination: Pagination,
    ) -> PgResult<Page<User>> {
        use schema::users::{self, dsl};

        let search_pattern = filter
            .search
            .as_deref()
            .map(|search| format!("%{}%", search.trim()));

        let mut query = users::table.filter(dsl::verification_status.eq(status)).into_boxed();
        let mut count_query = users::table
            .filter(dsl::verification_status.eq(status))
            .into_boxed();

        if let Some(pattern) = &search_pattern {
            query = query.filter(
                dsl::nickname
                    .ilike(pattern.clone())
                    .or(dsl::email_address.ilike(pattern.clone()))
                    .or(dsl::phone_number.ilike(pattern.clone())),
            );
            count_query = count_query.filter(
                dsl::nickname
                    .ilike(pattern.clone())
                    .or(dsl::email_address.ilike(pattern.clone()))
                    .or(dsl::phone_number.ilike(pattern.clone())),
            );
        }

        let total: i64 = count_query
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let items = query
            .order(dsl::created_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(User::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(Page::new(items, total))
    }

    async fn count_users_by_verification_status(
        &mut self,
        status: VerificationStatus,
    ) -> PgResult<i64> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::verification_status.eq(status))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn user_exists(&mut self, user_id: Uuid) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let count: i64 = users::table
            .filter(dsl::id.eq(user_id))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    async fn email_exists(&mut self, email: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let count: i64 = users::table
            .filter(dsl::email_address.eq(email.trim().to_lowercase()))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    async fn phone_exists(&mut self, phone: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let count: i64 = users::table
            .filter(dsl::phone_number.eq(phone.trim()))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    async fn get_user_stats(&mut self) -> PgResult<UserStats> {
        use schema::users::{self, dsl};

        let total_users: i64 = users::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let verified_users: i64 = users::table
            .filter(dsl::is_verified.eq(true))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let pending_verification: i64 = users::table
            .filter(dsl::verification_status.eq(VerificationStatus::Pending))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let rejected_verification: i64 = users::table
            .filter(dsl::verification_status.eq(VerificationStatus::Rejected))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(UserStats {
            total_users,
            verified_users,
            pending_verification,
            rejected_verification,
        })
    }
}
