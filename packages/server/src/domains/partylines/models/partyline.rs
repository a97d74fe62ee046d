use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::{EventId, PartylineId};

/// A named intercom channel attached to an event. Not part of the port graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Partyline {
    pub id: PartylineId,
    pub title: String,
    pub event_id: EventId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Partyline {
    pub async fn insert(
        id: PartylineId,
        title: &str,
        event_id: EventId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO partylines (id, title, event_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(event_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: PartylineId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM partylines WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM partylines ORDER BY created_at, id")
            .fetch_all(&mut *conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_for_events(
        event_ids: &[EventId],
        conn: &mut PgConnection,
    ) -> Result<Vec<Self>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Self>(
            "SELECT * FROM partylines WHERE event_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(event_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        id: PartylineId,
        title: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE partylines SET title = COALESCE($2, title), updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(title)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: PartylineId, conn: &mut PgConnection) -> Result<bool> {
        let result = sqlx::query("DELETE FROM partylines WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Removes every partyline of an event; returns how many went.
    pub async fn delete_for_event(event_id: EventId, conn: &mut PgConnection) -> Result<u64> {
        let result = sqlx::query("DELETE FROM partylines WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
