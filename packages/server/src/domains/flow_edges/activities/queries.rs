use anyhow::anyhow;
use std::collections::HashMap;

use crate::common::{
    DestinationPortId, EntityKind, EventId, FlowEdgeId, RoutingError, RoutingResult, SourcePortId,
};
use crate::domains::flow_edges::data::FlowEdgeDetail;
use crate::domains::flow_edges::models::FlowEdge;
use crate::domains::ports::models::{DestinationPort, SourcePort};
use crate::kernel::{RoutingTx, ServerDeps};

pub async fn get_flow_edge(id: FlowEdgeId, deps: &ServerDeps) -> RoutingResult<FlowEdge> {
    let mut tx = deps.begin().await?;
    let edge = tx.find_flow_edge(id).await?;
    tx.commit().await?;
    edge.ok_or_else(|| RoutingError::not_found(EntityKind::FlowEdge, id))
}

/// All edges, or only those whose source port traces back to `event_id`.
pub async fn list_flow_edges(
    event_id: Option<EventId>,
    deps: &ServerDeps,
) -> RoutingResult<Vec<FlowEdge>> {
    let mut tx = deps.begin().await?;
    let edges = load_edges(tx.as_mut(), event_id).await?;
    tx.commit().await?;
    Ok(edges)
}

pub async fn get_flow_edge_detail(
    id: FlowEdgeId,
    deps: &ServerDeps,
) -> RoutingResult<FlowEdgeDetail> {
    let mut tx = deps.begin().await?;
    let edge = tx
        .find_flow_edge(id)
        .await?
        .ok_or_else(|| RoutingError::not_found(EntityKind::FlowEdge, id))?;
    let mut details = expand(tx.as_mut(), vec![edge]).await?;
    tx.commit().await?;
    details
        .pop()
        .ok_or_else(|| RoutingError::not_found(EntityKind::FlowEdge, id))
}

pub async fn list_flow_edge_details(
    event_id: Option<EventId>,
    deps: &ServerDeps,
) -> RoutingResult<Vec<FlowEdgeDetail>> {
    let mut tx = deps.begin().await?;
    let edges = load_edges(tx.as_mut(), event_id).await?;
    let details = expand(tx.as_mut(), edges).await?;
    tx.commit().await?;
    Ok(details)
}

async fn load_edges(
    tx: &mut dyn RoutingTx,
    event_id: Option<EventId>,
) -> RoutingResult<Vec<FlowEdge>> {
    Ok(match event_id {
        Some(event_id) => tx
            .list_flow_edges_for_events(&[event_id])
            .await?
            .into_iter()
            .map(|tagged| tagged.edge)
            .collect(),
        None => tx.list_flow_edges().await?,
    })
}

/// Embeds both endpoint ports. Each port is looked up once even when
/// several edges share it.
async fn expand(
    tx: &mut dyn RoutingTx,
    edges: Vec<FlowEdge>,
) -> RoutingResult<Vec<FlowEdgeDetail>> {
    let mut source_ports: HashMap<SourcePortId, SourcePort> = HashMap::new();
    let mut destination_ports: HashMap<DestinationPortId, DestinationPort> = HashMap::new();
    let mut details = Vec::with_capacity(edges.len());

    for edge in edges {
        if !source_ports.contains_key(&edge.source_port_id) {
            let port = tx
                .find_source_port(edge.source_port_id)
                .await?
                .ok_or_else(|| anyhow!("flow edge {} has no source port", edge.id))?;
            source_ports.insert(port.id, port);
        }
        if !destination_ports.contains_key(&edge.destination_port_id) {
            let port = tx
                .find_destination_port(edge.destination_port_id)
                .await?
                .ok_or_else(|| anyhow!("flow edge {} has no destination port", edge.id))?;
            destination_ports.insert(port.id, port);
        }

        let source_port = source_ports[&edge.source_port_id].clone();
        let destination_port = destination_ports[&edge.destination_port_id].clone();
        details.push(FlowEdgeDetail::new(edge, source_port, destination_port));
    }
    Ok(details)
}
