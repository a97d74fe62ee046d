//! Referential rules of the routing graph.
//!
//! Ports hang off sources and destinations, flow edges hang off one source
//! port and one destination port. Every function here runs inside a caller's
//! [`RoutingTx`] and removes children before parents, so a committed
//! transaction never leaves an edge or port pointing at a missing row.
//!
//! Port compatibility (type, channel) and cross-event edges are deliberately
//! not checked.

pub mod cascade;
pub mod integrity;

pub use cascade::*;
pub use integrity::*;

use tracing::info;

use crate::common::{
    DestinationPortId, EntityKind, FlowEdgeId, RoutingError, RoutingResult, SourcePortId,
};
use crate::domains::flow_edges::data::CreateFlowEdgeInput;
use crate::domains::flow_edges::models::FlowEdge;
use crate::domains::ports::data::{CreateDestinationPortInput, CreateSourcePortInput};
use crate::domains::ports::models::{DestinationPort, SourcePort};
use crate::kernel::RoutingTx;

// =============================================================================
// Ports
// =============================================================================

pub async fn create_source_port(
    tx: &mut dyn RoutingTx,
    input: &CreateSourcePortInput,
) -> RoutingResult<SourcePort> {
    if tx.find_source(input.source_id).await?.is_none() {
        return Err(RoutingError::owner_not_found(
            EntityKind::Source,
            input.source_id,
        ));
    }
    let port = tx.insert_source_port(input).await?;
    info!(port_id = %port.id, source_id = %port.source_id, channel = port.channel, "Created source port");
    Ok(port)
}

pub async fn create_destination_port(
    tx: &mut dyn RoutingTx,
    input: &CreateDestinationPortInput,
) -> RoutingResult<DestinationPort> {
    if tx.find_destination(input.destination_id).await?.is_none() {
        return Err(RoutingError::owner_not_found(
            EntityKind::Destination,
            input.destination_id,
        ));
    }
    let port = tx.insert_destination_port(input).await?;
    info!(port_id = %port.id, destination_id = %port.destination_id, channel = port.channel, "Created destination port");
    Ok(port)
}

/// Deletes a source port and every flow edge leaving it.
///
/// Returns how many edges were removed.
pub async fn delete_source_port(tx: &mut dyn RoutingTx, id: SourcePortId) -> RoutingResult<u64> {
    if tx.find_source_port(id).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::SourcePort, id));
    }
    let edges = tx.delete_flow_edges_for_source_ports(&[id]).await?;
    tx.delete_source_port(id).await?;
    info!(port_id = %id, flow_edges = edges, "Deleted source port");
    Ok(edges)
}

/// Deletes a destination port and every flow edge arriving at it.
pub async fn delete_destination_port(
    tx: &mut dyn RoutingTx,
    id: DestinationPortId,
) -> RoutingResult<u64> {
    if tx.find_destination_port(id).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::DestinationPort, id));
    }
    let edges = tx.delete_flow_edges_for_destination_ports(&[id]).await?;
    tx.delete_destination_port(id).await?;
    info!(port_id = %id, flow_edges = edges, "Deleted destination port");
    Ok(edges)
}

// =============================================================================
// Flow edges
// =============================================================================

/// Connects a source port to a destination port.
///
/// Duplicate edges, fan-out and fan-in are all accepted.
pub async fn create_flow_edge(
    tx: &mut dyn RoutingTx,
    input: &CreateFlowEdgeInput,
) -> RoutingResult<FlowEdge> {
    if tx.find_source_port(input.source_port_id).await?.is_none() {
        return Err(RoutingError::SourcePortNotFound(
            input.source_port_id.into_uuid(),
        ));
    }
    if tx
        .find_destination_port(input.destination_port_id)
        .await?
        .is_none()
    {
        return Err(RoutingError::DestinationPortNotFound(
            input.destination_port_id.into_uuid(),
        ));
    }
    let edge = tx
        .insert_flow_edge(input.source_port_id, input.destination_port_id)
        .await?;
    info!(
        flow_edge_id = %edge.id,
        source_port_id = %edge.source_port_id,
        destination_port_id = %edge.destination_port_id,
        "Created flow edge"
    );
    Ok(edge)
}

/// Edges are leaves; nothing cascades from them.
pub async fn delete_flow_edge(tx: &mut dyn RoutingTx, id: FlowEdgeId) -> RoutingResult<()> {
    if !tx.delete_flow_edge(id).await? {
        return Err(RoutingError::not_found(EntityKind::FlowEdge, id));
    }
    info!(flow_edge_id = %id, "Deleted flow edge");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{DestinationId, SourceId};
    use crate::kernel::ServerDeps;

    async fn owners(tx: &mut dyn RoutingTx) -> (SourceId, DestinationId) {
        let event = tx.insert_event("Finals").await.unwrap();
        let source = tx.insert_source("Cam1", event.id).await.unwrap();
        let destination = tx.insert_destination("Out1", event.id).await.unwrap();
        (source.id, destination.id)
    }

    async fn ports(
        tx: &mut dyn RoutingTx,
        source_id: SourceId,
        destination_id: DestinationId,
    ) -> (SourcePort, DestinationPort) {
        let source_port = create_source_port(
            tx,
            &CreateSourcePortInput {
                port_type: "video".into(),
                channel: 1,
                description: None,
                source_id,
            },
        )
        .await
        .unwrap();
        let destination_port = create_destination_port(
            tx,
            &CreateDestinationPortInput {
                port_type: "video".into(),
                channel: 1,
                description: None,
                destination_id,
            },
        )
        .await
        .unwrap();
        (source_port, destination_port)
    }

    fn edge(sp: &SourcePort, dp: &DestinationPort) -> CreateFlowEdgeInput {
        CreateFlowEdgeInput {
            source_port_id: sp.id,
            destination_port_id: dp.id,
        }
    }

    #[tokio::test]
    async fn test_port_for_missing_owner_is_rejected() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let err = create_source_port(
            tx.as_mut(),
            &CreateSourcePortInput {
                port_type: "audio".into(),
                channel: 1,
                description: None,
                source_id: SourceId::new(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RoutingError::OwnerNotFound { .. }));
        assert!(tx.list_flow_edges().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edge_endpoints_must_exist() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let (source_id, destination_id) = owners(tx.as_mut()).await;
        let (sp, dp) = ports(tx.as_mut(), source_id, destination_id).await;

        let missing_source = CreateFlowEdgeInput {
            source_port_id: SourcePortId::new(),
            destination_port_id: dp.id,
        };
        let err = create_flow_edge(tx.as_mut(), &missing_source)
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::SourcePortNotFound(_)));

        let missing_destination = CreateFlowEdgeInput {
            source_port_id: sp.id,
            destination_port_id: DestinationPortId::new(),
        };
        let err = create_flow_edge(tx.as_mut(), &missing_destination)
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::DestinationPortNotFound(_)));
    }

    #[tokio::test]
    async fn test_deleting_port_removes_all_its_edges() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let (source_id, destination_id) = owners(tx.as_mut()).await;
        let (sp, dp) = ports(tx.as_mut(), source_id, destination_id).await;
        let (_, other_dp) = ports(tx.as_mut(), source_id, destination_id).await;
        for _ in 0..3 {
            create_flow_edge(tx.as_mut(), &edge(&sp, &dp)).await.unwrap();
        }
        let survivor = create_flow_edge(tx.as_mut(), &edge(&sp, &other_dp))
            .await
            .unwrap();

        let removed = delete_destination_port(tx.as_mut(), dp.id).await.unwrap();

        assert_eq!(removed, 3);
        assert_eq!(tx.list_flow_edges().await.unwrap(), vec![survivor]);
        assert!(tx.find_destination_port(dp.id).await.unwrap().is_none());
        assert!(find_dangling_flow_edges(tx.as_mut()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fan_out_edges_are_independent() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let (source_id, destination_id) = owners(tx.as_mut()).await;
        let (sp, dp) = ports(tx.as_mut(), source_id, destination_id).await;
        let first = create_flow_edge(tx.as_mut(), &edge(&sp, &dp)).await.unwrap();
        let second = create_flow_edge(tx.as_mut(), &edge(&sp, &dp)).await.unwrap();
        assert_ne!(first.id, second.id);

        delete_flow_edge(tx.as_mut(), first.id).await.unwrap();

        assert_eq!(tx.list_flow_edges().await.unwrap(), vec![second]);
        let err = delete_flow_edge(tx.as_mut(), first.id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_deleting_missing_port_is_not_found() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let err = delete_source_port(tx.as_mut(), SourcePortId::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
