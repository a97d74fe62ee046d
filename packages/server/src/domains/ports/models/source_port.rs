use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::{SourceId, SourcePortId};

/// A typed, channel-numbered output on a source (e.g. "audio channel 3").
///
/// `port_type` is free-form; callers use "audio" and "video" by convention.
/// Channel numbers are not unique per source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SourcePort {
    pub id: SourcePortId,
    #[serde(rename = "type")]
    pub port_type: String,
    pub channel: i32,
    pub description: Option<String>,
    pub source_id: SourceId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// SourcePort Queries
// =============================================================================

impl SourcePort {
    pub async fn insert(
        id: SourcePortId,
        port_type: &str,
        channel: i32,
        description: Option<&str>,
        source_id: SourceId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO source_ports (id, port_type, channel, description, source_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(port_type)
        .bind(channel)
        .bind(description)
        .bind(source_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: SourcePortId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM source_ports WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_for_sources(
        source_ids: &[SourceId],
        conn: &mut PgConnection,
    ) -> Result<Vec<Self>> {
        if source_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Self>(
            "SELECT * FROM source_ports WHERE source_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(source_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(Into::into)
    }

    /// `description: Some(None)` clears the description, `None` leaves it.
    pub async fn update(
        id: SourcePortId,
        port_type: Option<&str>,
        channel: Option<i32>,
        description: Option<Option<&str>>,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE source_ports
            SET port_type = COALESCE($2, port_type),
                channel = COALESCE($3, channel),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(port_type)
        .bind(channel)
        .bind(description.is_some())
        .bind(description.flatten())
        .fetch_optional(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: SourcePortId, conn: &mut PgConnection) -> Result<bool> {
        let result = sqlx::query("DELETE FROM source_ports WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_many(ids: &[SourcePortId], conn: &mut PgConnection) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM source_ports WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
