use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::{EventId, SourceId};

/// An input feed belonging to one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: SourceId,
    pub label: String,
    pub event_id: EventId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Source Queries
// =============================================================================

impl Source {
    pub async fn insert(
        id: SourceId,
        label: &str,
        event_id: EventId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO sources (id, label, event_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(label)
        .bind(event_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: SourceId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM sources WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM sources ORDER BY created_at, id")
            .fetch_all(&mut *conn)
            .await
            .map_err(Into::into)
    }

    /// Sources of several events in one round trip.
    pub async fn find_for_events(
        event_ids: &[EventId],
        conn: &mut PgConnection,
    ) -> Result<Vec<Self>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Self>(
            "SELECT * FROM sources WHERE event_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(event_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        id: SourceId,
        label: Option<&str>,
        event_id: Option<EventId>,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE sources
            SET label = COALESCE($2, label),
                event_id = COALESCE($3, event_id),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(label)
        .bind(event_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: SourceId, conn: &mut PgConnection) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
