use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::EventId;

/// A broadcast production being configured. Root of the routing graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Event Queries
// =============================================================================

impl Event {
    pub async fn insert(id: EventId, title: &str, conn: &mut PgConnection) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO events (id, title)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_one(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: EventId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM events ORDER BY created_at, id")
            .fetch_all(&mut *conn)
            .await
            .map_err(Into::into)
    }

    /// Applies whichever fields are set; `None` when the event does not exist.
    pub async fn update(
        id: EventId,
        title: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE events
            SET title = COALESCE($2, title), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(&mut *conn)
        .await
        .map_err(Into::into)
    }

    /// Returns `false` when no row matched.
    pub async fn delete(id: EventId, conn: &mut PgConnection) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
