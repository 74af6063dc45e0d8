//! Message repository for expiring one-to-one messaging.

use std::collections::HashMap;
use std::future::Future;

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;
use jiff::{Span, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRepository;
use super::{Page, Pagination};
use crate::model::{Message, NewMessage};
use crate::types::constants::message;
use crate::types::{ChatHistoryFilter, ConversationFilter, validate};
use crate::{PgConnection, PgError, PgResult, schema};

/// One entry of the conversation overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// The counterparty of the conversation.
    pub other_user_id: Uuid,
    /// Account nickname of the counterparty.
    pub other_nickname: String,
    /// Body of the most recent active message.
    pub last_message_body: String,
    /// When the most recent active message was sent.
    pub last_message_at: Timestamp,
    /// Whether the most recent active message was sent by the requesting user.
    pub last_message_outbound: bool,
    /// Number of active messages received from the counterparty.
    pub unread_count: i64,
    /// Number of active messages in the conversation.
    pub total_count: i64,
}

/// Aggregate counts over the message table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageStats {
    /// Number of messages overall, expired included.
    pub total_messages: i64,
    /// Number of messages sent since UTC midnight.
    pub sent_today: i64,
    /// Number of distinct sender/receiver pairs with active messages.
    pub active_conversations: i64,
    /// Number of messages whose expiry has passed.
    pub expired_messages: i64,
    /// Average number of active messages per active conversation.
    pub avg_messages_per_conversation: f64,
}

/// Repository for direct message database operations.
///
/// Handles sending, chat history, the conversation overview, and expiry
/// cleanup.
pub trait MessageRepository {
    /// Sends a new direct message.
    ///
    /// The body must be non-empty and within the length limit, both parties
    /// must exist, and self-messaging is rejected. When no expiry is given,
    /// the default retention window is applied.
    fn send_message(
        &mut self,
        new_message: NewMessage,
    ) -> impl Future<Output = PgResult<Message>> + Send;

    /// Fetches the message history between two users with its total count.
    ///
    /// The pair predicate is symmetric; either user may be passed first.
    /// Expired messages are excluded unless the filter requests them.
    /// Results are ordered newest first.
    fn fetch_chat_history(
        &mut self,
        user_a: Uuid,
        user_b: Uuid,
        filter: &ChatHistoryFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Page<Message>>> + Send;

    /// Fetches the conversation overview for a user.
    ///
    /// One entry per counterparty with active messages, newest conversation
    /// first. Pagination applies to the counterparty list, and the total is
    /// the number of distinct conversations.
    fn fetch_conversations(
        &mut self,
        user_id: Uuid,
        filter: &ConversationFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Page<ConversationSummary>>> + Send;

    /// Deletes all messages whose expiry has passed.
    ///
    /// Returns the number of messages removed. Safe to run repeatedly.
    fn cleanup_expired_messages(&mut self) -> impl Future<Output = PgResult<usize>> + Send;

    /// Deletes a message on behalf of its sender.
    ///
    /// Only the sender may delete. Returns `false` when the message does
    /// not exist or the given user is not its sender.
    fn delete_message(
        &mut self,
        message_id: Uuid,
        sender_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Retrieves aggregate message counts for dashboards.
    fn get_message_stats(&mut self) -> impl Future<Output = PgResult<MessageStats>> + Send;
}

impl MessageRepository for PgConnection {
    async fn send_message(&mut self, mut new_message: NewMessage) -> PgResult<Message> {
        use schema::messages;

        new_message.body = new_message.body.trim().to_owned();

        validate::require_non_empty("body", &new_message.body)?;
        validate::validate_length_max("body", &new_message.body, message::BODY_LENGTH_MAX)?;

        if new_message.sender_id == new_message.receiver_id {
            return Err(PgError::Invalid {
                field: "receiver_id".into(),
                reason: "must differ from the sender".into(),
            });
        }

        if !self.user_exists(new_message.sender_id).await? {
            return Err(PgError::NotFound {
                entity: "user",
                id: new_message.sender_id,
            });
        }
        if !self.user_exists(new_message.receiver_id).await? {
            return Err(PgError::NotFound {
                entity: "user",
                id: new_message.receiver_id,
            });
        }

        if new_message.expires_at.is_none() {
            let expires_at = Timestamp::now() + Span::new().days(message::DEFAULT_EXPIRY_DAYS);
            new_message.expires_at = Some(expires_at.into());
        }

        diesel::insert_into(messages::table)
            .values(&new_message)
            .returning(Message::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn fetch_chat_history(
        &mut self,
        user_a: Uuid,
        user_b: Uuid,
        filter: &ChatHistoryFilter,
        pagination: Pagination,
    ) -> PgResult<Page<Message>> {
        use schema::messages::{self, dsl};

        let now = jiff_diesel::Timestamp::from(Timestamp::now());

        let mut query = messages::table
            .filter(
                dsl::sender_id
                    .eq(user_a)
                    .and(dsl::receiver_id.eq(user_b))
                    .or(dsl::sender_id.eq(user_b).and(dsl::receiver_id.eq(user_a))),
            )
            .into_boxed();
        let mut count_query = messages::table
            .filter(
                dsl::sender_id
                    .eq(user_a)
                    .and(dsl::receiver_id.eq(user_b))
                    .or(dsl::sender_id.eq(user_b).and(dsl::receiver_id.eq(user_a))),
            )
            .into_boxed();

        if !filter.include_expired {
            query = query.filter(dsl::expires_at.is_null().or(dsl::expires_at.gt(now)));
            count_query = count_query.filter(dsl::expires_at.is_null().or(dsl::expires_at.gt(now)));
        }

        if let Some(sent_after) = filter.sent_after {
            let bound = jiff_diesel::Timestamp::from(sent_after);
            query = query.filter(dsl::created_at.ge(bound));
            count_query = count_query.filter(dsl::created_at.ge(bound));
        }

        if let Some(sent_before) = filter.sent_before {
            let bound = jiff_diesel::Timestamp::from(sent_before);
            query = query.filter(dsl::created_at.le(bound));
            count_query = count_query.filter(dsl::created_at.le(bound));
        }

        let total: i64 = count_query
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let items = query
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Message::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(Page::new(items, total))
    }

    async fn fetch_conversations(
        &mut self,
        user_id: Uuid,
        filter: &ConversationFilter,
        pagination: Pagination,
    ) -> PgResult<Page<ConversationSummary>> {
        use schema::messages::{self, dsl};
        use schema::users;

        let now = jiff_diesel::Timestamp::from(Timestamp::now());

        // One pass over the user's active messages, newest first: the first
        // row seen per counterparty is the conversation's last message.
        let rows: Vec<(Uuid, Uuid, String, jiff_diesel::Timestamp)> = messages::table
            .filter(dsl::sender_id.eq(user_id).or(dsl::receiver_id.eq(user_id)))
            .filter(dsl::expires_at.is_null().or(dsl::expires_at.gt(now)))
            .order(dsl::created_at.desc())
            .select((dsl::sender_id, dsl::receiver_id, dsl::body, dsl::created_at))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let mut order: Vec<Uuid> = Vec::new();
        let mut summaries: HashMap<Uuid, ConversationSummary> = HashMap::new();
        for (sender_id, receiver_id, body, created_at) in rows {
            let other = if sender_id == user_id {
                receiver_id
            } else {
                sender_id
            };
            let entry = summaries.entry(other).or_insert_with(|| {
                order.push(other);
                ConversationSummary {
                    other_user_id: other,
                    other_nickname: String::new(),
                    last_message_body: body,
                    last_message_at: created_at.into(),
                    last_message_outbound: sender_id == user_id,
                    unread_count: 0,
                    total_count: 0,
                }
            });
            entry.total_count += 1;
            if receiver_id == user_id {
                entry.unread_count += 1;
            }
        }

        let nicknames: HashMap<Uuid, String> = users::table
            .filter(users::id.eq_any(&order))
            .select((users::id, users::nickname))
            .load::<(Uuid, String)>(self)
            .await
            .map_err(PgError::from)?
            .into_iter()
            .collect();

        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase);

        let mut conversations: Vec<ConversationSummary> = Vec::new();
        for other in order {
            let Some(nickname) = nicknames.get(&other) else {
                continue;
            };
            if let Some(search) = &search
                && !nickname.to_lowercase().contains(search)
            {
                continue;
            }
            if let Some(mut summary) = summaries.remove(&other) {
                summary.other_nickname = nickname.clone();
                conversations.push(summary);
            }
        }

        let total = conversations.len() as i64;
        let items = conversations
            .into_iter()
            .skip(pagination.offset.max(0) as usize)
            .take(pagination.limit.max(0) as usize)
            .collect();

        Ok(Page::new(items, total))
    }

    async fn cleanup_expired_messages(&mut self) -> PgResult<usize> {
        use schema::messages::{self, dsl};

        let now = jiff_diesel::Timestamp::from(Timestamp::now());

        diesel::delete(messages::table.filter(dsl::expires_at.le(now)))
            .execute(self)
            .await
            .map_err(PgError::from)
    }

    async fn delete_message(&mut self, message_id: Uuid, sender_id: Uuid) -> PgResult<bool> {
        use schema::messages::{self, dsl};

        let removed = diesel::delete(
            messages::table
                .filter(dsl::id.eq(message_id))
                .filter(dsl::sender_id.eq(sender_id)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        Ok(removed > 0)
    }

    async fn get_message_stats(&mut self) -> PgResult<MessageStats> {
        use schema::messages::{self, dsl};

        let now = Timestamp::now();
        let now_db = jiff_diesel::Timestamp::from(now);
        let today_start = now
            .to_zoned(jiff::tz::TimeZone::UTC)
            .start_of_day()
            .map_err(|err| PgError::Unexpected(err.to_string().into()))?
            .timestamp();
        let today_start = jiff_diesel::Timestamp::from(today_start);

        let total_messages: i64 = messages::table
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let sent_today: i64 = messages::table
            .filter(dsl::created_at.ge(today_start))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let expired_messages: i64 = messages::table
            .filter(dsl::expires_at.le(now_db))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let active_messages: i64 = messages::table
            .filter(dsl::expires_at.is_null().or(dsl::expires_at.gt(now_db)))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        // Unordered pair: (least, greatest) folds both directions together
        let active_conversations: i64 = messages::table
            .filter(dsl::expires_at.is_null().or(dsl::expires_at.gt(now_db)))
            .select(sql::<BigInt>(
                "COUNT(DISTINCT (LEAST(sender_id, receiver_id), GREATEST(sender_id, receiver_id)))",
            ))
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let avg_messages_per_conversation = if active_conversations > 0 {
            active_messages as f64 / active_conversations as f64
        } else {
            0.0
        };

        Ok(MessageStats {
            total_messages,
            sent_today,
            active_conversations,
            expired_messages,
            avg_messages_per_conversation,
        })
    }
}
