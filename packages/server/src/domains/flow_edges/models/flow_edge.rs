use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::common::{DestinationPortId, EventId, FlowEdgeId, SourcePortId};

/// A directed connection from one source port to one destination port.
///
/// Fan-out and fan-in are allowed and duplicate edges are not rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub id: FlowEdgeId,
    pub source_port_id: SourcePortId,
    pub destination_port_id: DestinationPortId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A flow edge tagged with the event its source port traces back to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventFlowEdge {
    pub event_id: EventId,
    #[sqlx(flatten)]
    pub edge: FlowEdge,
}

// =============================================================================
// FlowEdge Queries
// =============================================================================

impl FlowEdge {
    pub async fn insert(
        id: FlowEdgeId,
        source_port_id: SourcePortId,
        destination_port_id: DestinationPortId,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO flow_edges (id, source_port_id, destination_port_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(source_port_id)
        .bind(destination_port_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: FlowEdgeId, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM flow_edges WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM flow_edges ORDER BY created_at, id")
            .fetch_all(&mut *conn)
            .await
            .map_err(Into::into)
    }

    /// Edges whose source port belongs to a source of one of `event_ids`.
    ///
    /// Edges carry no event column; the join runs
    /// edge -> source port -> source -> event.
    pub async fn find_for_events(
        event_ids: &[EventId],
        conn: &mut PgConnection,
    ) -> Result<Vec<EventFlowEdge>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, EventFlowEdge>(
            r#"
            SELECT s.event_id, fe.*
            FROM flow_edges fe
            INNER JOIN source_ports sp ON sp.id = fe.source_port_id
            INNER JOIN sources s ON s.id = sp.source_id
            WHERE s.event_id = ANY($1)
            ORDER BY fe.created_at, fe.id
            "#,
        )
        .bind(event_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: FlowEdgeId, conn: &mut PgConnection) -> Result<bool> {
        let result = sqlx::query("DELETE FROM flow_edges WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_for_source_ports(
        port_ids: &[SourcePortId],
        conn: &mut PgConnection,
    ) -> Result<u64> {
        if port_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM flow_edges WHERE source_port_id = ANY($1)")
            .bind(port_ids)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_for_destination_ports(
        port_ids: &[DestinationPortId],
        conn: &mut PgConnection,
    ) -> Result<u64> {
        if port_ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM flow_edges WHERE destination_port_id = ANY($1)")
            .bind(port_ids)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
