//! Owner deletes: sources, destinations and whole events.

use serde::Serialize;
use tracing::info;

use crate::common::{
    DestinationId, EntityKind, EventId, RoutingError, RoutingResult, SourceId,
};
use crate::kernel::RoutingTx;

/// How many rows a cascading delete removed, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub sources: u64,
    pub destinations: u64,
    pub partylines: u64,
    pub source_ports: u64,
    pub destination_ports: u64,
    pub flow_edges: u64,
}

impl CascadeReport {
    fn absorb(&mut self, other: CascadeReport) {
        self.sources += other.sources;
        self.destinations += other.destinations;
        self.partylines += other.partylines;
        self.source_ports += other.source_ports;
        self.destination_ports += other.destination_ports;
        self.flow_edges += other.flow_edges;
    }
}

/// Removes sources with all of their ports and the edges leaving them.
///
/// Edges, ports and owners each go in one batch call, in that order.
pub async fn remove_sources(
    tx: &mut dyn RoutingTx,
    source_ids: &[SourceId],
) -> RoutingResult<CascadeReport> {
    let mut report = CascadeReport::default();
    if source_ids.is_empty() {
        return Ok(report);
    }

    let port_ids: Vec<_> = tx
        .list_source_ports_for_sources(source_ids)
        .await?
        .into_iter()
        .map(|port| port.id)
        .collect();

    report.flow_edges = tx.delete_flow_edges_for_source_ports(&port_ids).await?;
    report.source_ports = tx.delete_source_ports(&port_ids).await?;
    for id in source_ids {
        if tx.delete_source(*id).await? {
            report.sources += 1;
        }
    }
    Ok(report)
}

/// Removes destinations with all of their ports and the edges arriving at them.
pub async fn remove_destinations(
    tx: &mut dyn RoutingTx,
    destination_ids: &[DestinationId],
) -> RoutingResult<CascadeReport> {
    let mut report = CascadeReport::default();
    if destination_ids.is_empty() {
        return Ok(report);
    }

    let port_ids: Vec<_> = tx
        .list_destination_ports_for_destinations(destination_ids)
        .await?
        .into_iter()
        .map(|port| port.id)
        .collect();

    report.flow_edges = tx
        .delete_flow_edges_for_destination_ports(&port_ids)
        .await?;
    report.destination_ports = tx.delete_destination_ports(&port_ids).await?;
    for id in destination_ids {
        if tx.delete_destination(*id).await? {
            report.destinations += 1;
        }
    }
    Ok(report)
}

pub async fn delete_source(tx: &mut dyn RoutingTx, id: SourceId) -> RoutingResult<CascadeReport> {
    if tx.find_source(id).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::Source, id));
    }
    let report = remove_sources(tx, &[id]).await?;
    info!(
        source_id = %id,
        ports = report.source_ports,
        flow_edges = report.flow_edges,
        "Deleted source"
    );
    Ok(report)
}

pub async fn delete_destination(
    tx: &mut dyn RoutingTx,
    id: DestinationId,
) -> RoutingResult<CascadeReport> {
    if tx.find_destination(id).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::Destination, id));
    }
    let report = remove_destinations(tx, &[id]).await?;
    info!(
        destination_id = %id,
        ports = report.destination_ports,
        flow_edges = report.flow_edges,
        "Deleted destination"
    );
    Ok(report)
}

/// Deletes an event and everything under it.
pub async fn delete_event(tx: &mut dyn RoutingTx, id: EventId) -> RoutingResult<CascadeReport> {
    if tx.find_event(id).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::Event, id));
    }

    let source_ids: Vec<_> = tx
        .list_sources_for_events(&[id])
        .await?
        .into_iter()
        .map(|source| source.id)
        .collect();
    let destination_ids: Vec<_> = tx
        .list_destinations_for_events(&[id])
        .await?
        .into_iter()
        .map(|destination| destination.id)
        .collect();

    let mut report = remove_sources(tx, &source_ids).await?;
    report.absorb(remove_destinations(tx, &destination_ids).await?);
    report.partylines = tx.delete_partylines_for_event(id).await?;
    tx.delete_event(id).await?;

    info!(
        event_id = %id,
        sources = report.sources,
        destinations = report.destinations,
        partylines = report.partylines,
        flow_edges = report.flow_edges,
        "Deleted event"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::flow_edges::data::CreateFlowEdgeInput;
    use crate::domains::graph::{create_flow_edge, find_dangling_flow_edges};
    use crate::domains::ports::data::{CreateDestinationPortInput, CreateSourcePortInput};
    use crate::kernel::ServerDeps;

    /// One event with `ports` ports on each side and every source port wired
    /// to every destination port.
    async fn meshed_event(tx: &mut dyn RoutingTx, ports: i32) -> (EventId, SourceId, DestinationId) {
        let event = tx.insert_event("Finals").await.unwrap();
        let source = tx.insert_source("Cam1", event.id).await.unwrap();
        let destination = tx.insert_destination("Out1", event.id).await.unwrap();
        tx.insert_partyline("Director", event.id).await.unwrap();

        let mut source_ports = Vec::new();
        let mut destination_ports = Vec::new();
        for channel in 1..=ports {
            source_ports.push(
                tx.insert_source_port(&CreateSourcePortInput {
                    port_type: "audio".into(),
                    channel,
                    description: None,
                    source_id: source.id,
                })
                .await
                .unwrap(),
            );
            destination_ports.push(
                tx.insert_destination_port(&CreateDestinationPortInput {
                    port_type: "audio".into(),
                    channel,
                    description: None,
                    destination_id: destination.id,
                })
                .await
                .unwrap(),
            );
        }
        for sp in &source_ports {
            for dp in &destination_ports {
                let input = CreateFlowEdgeInput {
                    source_port_id: sp.id,
                    destination_port_id: dp.id,
                };
                create_flow_edge(tx, &input).await.unwrap();
            }
        }
        (event.id, source.id, destination.id)
    }

    #[tokio::test]
    async fn test_source_delete_removes_ports_and_edges() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let (_, source_id, destination_id) = meshed_event(tx.as_mut(), 3).await;

        let report = delete_source(tx.as_mut(), source_id).await.unwrap();

        assert_eq!(report.sources, 1);
        assert_eq!(report.source_ports, 3);
        assert_eq!(report.flow_edges, 9);
        assert!(tx.list_flow_edges().await.unwrap().is_empty());
        assert!(tx
            .list_source_ports_for_sources(&[source_id])
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            tx.list_destination_ports_for_destinations(&[destination_id])
                .await
                .unwrap()
                .len(),
            3
        );
    }

    #[tokio::test]
    async fn test_event_delete_leaves_nothing_behind() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let (event_id, _, _) = meshed_event(tx.as_mut(), 2).await;
        let (other_event, _, _) = meshed_event(tx.as_mut(), 1).await;

        let report = delete_event(tx.as_mut(), event_id).await.unwrap();

        assert_eq!(
            report,
            CascadeReport {
                sources: 1,
                destinations: 1,
                partylines: 1,
                source_ports: 2,
                destination_ports: 2,
                flow_edges: 4,
            }
        );
        assert!(tx.find_event(event_id).await.unwrap().is_none());
        assert_eq!(tx.list_events().await.unwrap().len(), 1);
        assert_eq!(tx.list_flow_edges().await.unwrap().len(), 1);
        assert_eq!(
            tx.list_partylines_for_events(&[other_event])
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(find_dangling_flow_edges(tx.as_mut()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uncommitted_cascade_is_rolled_back() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let (event_id, _, _) = meshed_event(tx.as_mut(), 2).await;
        tx.commit().await.unwrap();

        let mut tx = deps.begin().await.unwrap();
        delete_event(tx.as_mut(), event_id).await.unwrap();
        drop(tx);

        let mut tx = deps.begin().await.unwrap();
        assert!(tx.find_event(event_id).await.unwrap().is_some());
        assert_eq!(tx.list_flow_edges().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_deleting_missing_destination_is_not_found() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let err = delete_destination(tx.as_mut(), DestinationId::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
