use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::{DestinationId, DestinationPortId};

/// A typed, channel-numbered input on a destination (e.g. "audio channel 3").
///
/// `port_type` is free-form; callers use "audio" and "video" by convention.
/// Channel numbers are not unique per destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DestinationPort {
    pub id: DestinationPortId,
    #[serde(rename = "type")]
    pub port_type: String,
    pub channel: i32,
    pub description: Option<String>,
    pub destination_id: DestinationId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// DestinationPort Queries
// =============================================================================

impl DestinationPort {
    pub async fn insert(
        id: DestinationPortId,
        port_type: &str,
        channel: i32,
        description: Option<&str>,
        destination_id: DestinationId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO destination_ports (id, port_type, channel, description, destination_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(port_type)
        .bind(channel)
        .bind(description)
        .bind(destination_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: DestinationPortId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM destination_ports WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_for_destinations(
        destination_ids: &[DestinationId],
        conn: &mut PgConnection,
    ) -> Result<Vec<Self>> {
        if destination_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Self>(
            "SELECT * FROM destination_ports WHERE destination_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(destination_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(Into::into)
    }

    /// `description: Some(None)` clears the description, `None` leaves it.
    pub async fn update(
        id: DestinationPortId,
        port_type: Option<&str>,
        channel: Option<i32>,
        description: Option<Option<&str>>,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE destination_ports
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

    pub async fn delete(id: DestinationPortId, conn: &mut PgConnection) -> Result<bool> {
        let result = sqlx::query("DELETE FROM destination_ports WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_many(ids: &[DestinationPortId], conn: &mut PgConnection) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM destination_ports WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
