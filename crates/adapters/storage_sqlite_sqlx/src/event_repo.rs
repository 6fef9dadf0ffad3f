//! `SQLite` implementation of [`EventRepository`].
//!
//! Participants live in `event_participants`, keyed by event and list
//! position. Writes that touch both tables run in one transaction.

use std::collections::HashMap;
use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, Transaction};

use depot_app::ports::EventRepository;
use depot_domain::error::DepotError;
use depot_domain::event::{Event, EventPayload, Participant};
use depot_domain::id::{EventId, UserId};

use crate::codec::{decode_timestamp, encode_timestamp};
use crate::error::StorageError;

/// Event row without its participants.
struct Wrapper(Event);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let start: String = row.try_get("start_at")?;
        let end: String = row.try_get("end_at")?;
        Ok(Self(Event {
            id: EventId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            start: decode_timestamp(&start)?,
            end: decode_timestamp(&end)?,
            participants: Vec::new(),
        }))
    }
}

struct ParticipantWrapper(EventId, Participant);

impl<'r> FromRow<'r, SqliteRow> for ParticipantWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let arrival: String = row.try_get("arrival")?;
        let departure: String = row.try_get("departure")?;
        Ok(Self(
            EventId::new(row.try_get("event_id")?),
            Participant {
                user_id: UserId::new(row.try_get("user_id")?),
                arrival: decode_timestamp(&arrival)?,
                departure: decode_timestamp(&departure)?,
            },
        ))
    }
}

const INSERT: &str = "INSERT INTO events (name, start_at, end_at) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM events WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM events ORDER BY start_at, id";
const UPDATE: &str = "UPDATE events SET name = ?, start_at = ?, end_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM events WHERE id = ?";

const INSERT_PARTICIPANT: &str = "INSERT INTO event_participants \
                                  (event_id, position, user_id, arrival, departure) \
                                  VALUES (?, ?, ?, ?, ?)";
const SELECT_PARTICIPANTS: &str =
    "SELECT * FROM event_participants WHERE event_id = ? ORDER BY position";
const SELECT_ALL_PARTICIPANTS: &str =
    "SELECT * FROM event_participants ORDER BY event_id, position";
const DELETE_PARTICIPANTS: &str = "DELETE FROM event_participants WHERE event_id = ?";

async fn insert_participants(
    tx: &mut Transaction<'_, Sqlite>,
    event_id: EventId,
    participants: &[Participant],
) -> Result<(), StorageError> {
    for (position, participant) in (0_i64..).zip(participants) {
        sqlx::query(INSERT_PARTICIPANT)
            .bind(event_id.get())
            .bind(position)
            .bind(participant.user_id.get())
            .bind(encode_timestamp(participant.arrival))
            .bind(encode_timestamp(participant.departure))
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// `SQLite`-backed event repository.
pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventRepository for SqliteEventRepository {
    fn create(&self, event: EventPayload) -> impl Future<Output = Result<Event, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let result = sqlx::query(INSERT)
                .bind(&event.name)
                .bind(encode_timestamp(event.start))
                .bind(encode_timestamp(event.end))
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            let id = EventId::new(result.last_insert_rowid());
            insert_participants(&mut tx, id, &event.participants).await?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(event.into_event(id))
        }
    }

    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;
            let Some(Wrapper(mut event)) = row else {
                return Ok(None);
            };

            let participants: Vec<ParticipantWrapper> = sqlx::query_as(SELECT_PARTICIPANTS)
                .bind(id.get())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;
            event.participants = participants.into_iter().map(|p| p.1).collect();

            Ok(Some(event))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;
            let participants: Vec<ParticipantWrapper> = sqlx::query_as(SELECT_ALL_PARTICIPANTS)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let mut by_event: HashMap<EventId, Vec<Participant>> = HashMap::new();
            for ParticipantWrapper(event_id, participant) in participants {
                by_event.entry(event_id).or_default().push(participant);
            }

            Ok(rows
                .into_iter()
                .map(|Wrapper(mut event)| {
                    event.participants = by_event.remove(&event.id).unwrap_or_default();
                    event
                })
                .collect())
        }
    }

    fn update(
        &self,
        event: Event,
    ) -> impl Future<Output = Result<Option<Event>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let result = sqlx::query(UPDATE)
                .bind(&event.name)
                .bind(encode_timestamp(event.start))
                .bind(encode_timestamp(event.end))
                .bind(event.id.get())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            if result.rows_affected() == 0 {
                return Ok(None);
            }

            sqlx::query(DELETE_PARTICIPANTS)
                .bind(event.id.get())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            insert_participants(&mut tx, event.id, &event.participants).await?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(Some(event))
        }
    }

    fn delete(&self, id: EventId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            sqlx::query(DELETE_PARTICIPANTS)
                .bind(id.get())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(result.rows_affected() > 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use chrono::{DateTime, Duration, Utc};
    use depot_domain::time::Timestamp;

    async fn setup() -> SqliteEventRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteEventRepository::new(db.pool().clone())
    }

    fn at(hour: i64) -> Timestamp {
        DateTime::parse_from_rfc3339("2026-06-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
            + Duration::hours(hour)
    }

    fn payload(name: &str, start: i64, users: &[i64]) -> EventPayload {
        EventPayload {
            name: name.to_string(),
            start: at(start),
            end: at(start + 4),
            participants: users
                .iter()
                .map(|&u| Participant {
                    user_id: UserId::new(u),
                    arrival: at(start),
                    departure: at(start + 2),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn should_persist_participants_in_order() {
        let repo = setup().await;
        let created = repo.create(payload("Cleanup", 10, &[3, 1, 2])).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        let users: Vec<_> = fetched.participants.iter().map(|p| p.user_id.get()).collect();
        assert_eq!(users, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn should_list_events_by_start_then_id() {
        let repo = setup().await;
        let late = repo.create(payload("Late", 20, &[1])).await.unwrap();
        let early = repo.create(payload("Early", 5, &[])).await.unwrap();
        let tie = repo.create(payload("Tie", 20, &[2])).await.unwrap();

        let all = repo.get_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![early.id, late.id, tie.id]);
        assert_eq!(all[1].participants.len(), 1);
        assert!(all[0].participants.is_empty());
    }

    #[tokio::test]
    async fn should_replace_participants_on_update() {
        let repo = setup().await;
        let mut event = repo.create(payload("Cleanup", 10, &[1, 2])).await.unwrap();
        event.participants.truncate(1);
        event.name = "Spring cleanup".to_string();

        repo.update(event.clone()).await.unwrap().unwrap();
        assert_eq!(repo.get_by_id(event.id).await.unwrap(), Some(event));
    }

    #[tokio::test]
    async fn should_return_none_when_updating_missing_event() {
        let repo = setup().await;
        let ghost = payload("Ghost", 1, &[1]).into_event(EventId::new(77));
        assert!(repo.update(ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_drop_participants_with_event() {
        let repo = setup().await;
        let created = repo.create(payload("Cleanup", 10, &[1, 2])).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());

        let (left,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM event_participants")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(left, 0);
    }
}
