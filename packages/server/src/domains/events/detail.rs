//! Denormalized read views of events.
//!
//! Nothing here is cached: every call reassembles the view from the store.
//! Bulk reads fetch each table once for all requested events and partition
//! the rows in memory, rather than issuing one round of queries per event.

use serde::Serialize;
use std::collections::HashMap;

use crate::common::{
    DestinationId, EntityKind, EventId, RoutingError, RoutingResult, SourceId,
};
use crate::domains::destinations::models::Destination;
use crate::domains::flow_edges::models::{EventFlowEdge, FlowEdge};
use crate::domains::partylines::models::Partyline;
use crate::domains::ports::models::{DestinationPort, SourcePort};
use crate::domains::sources::models::Source;
use crate::kernel::RoutingTx;

use super::models::Event;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceWithPorts {
    #[serde(flatten)]
    pub source: Source,
    pub ports: Vec<SourcePort>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationWithPorts {
    #[serde(flatten)]
    pub destination: Destination,
    pub ports: Vec<DestinationPort>,
}

/// An event with its whole routing graph.
///
/// `flow_edges` holds exactly the edges whose source port belongs to one of
/// this event's sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub sources: Vec<SourceWithPorts>,
    pub destinations: Vec<DestinationWithPorts>,
    pub partylines: Vec<Partyline>,
    pub flow_edges: Vec<FlowEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRef<I> {
    pub id: I,
    pub label: String,
}

/// List-view shape: the event plus the labels of its sources and destinations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub sources: Vec<LabelRef<SourceId>>,
    pub destinations: Vec<LabelRef<DestinationId>>,
}

/// Every row needed to build the details of a set of events.
#[derive(Debug, Default)]
pub struct EventGraphRows {
    pub sources: Vec<Source>,
    pub destinations: Vec<Destination>,
    pub partylines: Vec<Partyline>,
    pub source_ports: Vec<SourcePort>,
    pub destination_ports: Vec<DestinationPort>,
    pub flow_edges: Vec<EventFlowEdge>,
}

impl EventGraphRows {
    /// One batched query per table, whatever the number of events.
    pub async fn load(tx: &mut dyn RoutingTx, event_ids: &[EventId]) -> RoutingResult<Self> {
        let sources = tx.list_sources_for_events(event_ids).await?;
        let destinations = tx.list_destinations_for_events(event_ids).await?;
        let partylines = tx.list_partylines_for_events(event_ids).await?;

        let source_ids: Vec<_> = sources.iter().map(|s| s.id).collect();
        let destination_ids: Vec<_> = destinations.iter().map(|d| d.id).collect();
        let source_ports = tx.list_source_ports_for_sources(&source_ids).await?;
        let destination_ports = tx
            .list_destination_ports_for_destinations(&destination_ids)
            .await?;
        let flow_edges = tx.list_flow_edges_for_events(event_ids).await?;

        Ok(Self {
            sources,
            destinations,
            partylines,
            source_ports,
            destination_ports,
            flow_edges,
        })
    }
}

/// Partitions `rows` by owner and builds one detail per event, in the order
/// `events` were given.
pub fn assemble_details(events: Vec<Event>, rows: EventGraphRows) -> Vec<EventDetail> {
    let mut source_ports: HashMap<SourceId, Vec<SourcePort>> = HashMap::new();
    for port in rows.source_ports {
        source_ports.entry(port.source_id).or_default().push(port);
    }
    let mut destination_ports: HashMap<DestinationId, Vec<DestinationPort>> = HashMap::new();
    for port in rows.destination_ports {
        destination_ports
            .entry(port.destination_id)
            .or_default()
            .push(port);
    }

    let mut sources: HashMap<EventId, Vec<SourceWithPorts>> = HashMap::new();
    for source in rows.sources {
        let ports = source_ports.remove(&source.id).unwrap_or_default();
        sources
            .entry(source.event_id)
            .or_default()
            .push(SourceWithPorts { source, ports });
    }
    let mut destinations: HashMap<EventId, Vec<DestinationWithPorts>> = HashMap::new();
    for destination in rows.destinations {
        let ports = destination_ports
            .remove(&destination.id)
            .unwrap_or_default();
        destinations
            .entry(destination.event_id)
            .or_default()
            .push(DestinationWithPorts { destination, ports });
    }
    let mut partylines: HashMap<EventId, Vec<Partyline>> = HashMap::new();
    for partyline in rows.partylines {
        partylines
            .entry(partyline.event_id)
            .or_default()
            .push(partyline);
    }
    let mut flow_edges: HashMap<EventId, Vec<FlowEdge>> = HashMap::new();
    for tagged in rows.flow_edges {
        flow_edges.entry(tagged.event_id).or_default().push(tagged.edge);
    }

    events
        .into_iter()
        .map(|event| EventDetail {
            sources: sources.remove(&event.id).unwrap_or_default(),
            destinations: destinations.remove(&event.id).unwrap_or_default(),
            partylines: partylines.remove(&event.id).unwrap_or_default(),
            flow_edges: flow_edges.remove(&event.id).unwrap_or_default(),
            event,
        })
        .collect()
}

/// Detail of one event inside an open transaction.
pub async fn load_event_detail(tx: &mut dyn RoutingTx, id: EventId) -> RoutingResult<EventDetail> {
    let event = tx
        .find_event(id)
        .await?
        .ok_or_else(|| RoutingError::not_found(EntityKind::Event, id))?;
    let rows = EventGraphRows::load(tx, &[id]).await?;
    assemble_details(vec![event], rows)
        .pop()
        .ok_or_else(|| RoutingError::not_found(EntityKind::Event, id))
}

/// Builds list summaries from the sources and destinations of `events`.
pub fn summarize(
    events: Vec<Event>,
    sources: Vec<Source>,
    destinations: Vec<Destination>,
) -> Vec<EventSummary> {
    let mut source_labels: HashMap<EventId, Vec<LabelRef<SourceId>>> = HashMap::new();
    for source in sources {
        source_labels
            .entry(source.event_id)
            .or_default()
            .push(LabelRef {
                id: source.id,
                label: source.label,
            });
    }
    let mut destination_labels: HashMap<EventId, Vec<LabelRef<DestinationId>>> = HashMap::new();
    for destination in destinations {
        destination_labels
            .entry(destination.event_id)
            .or_default()
            .push(LabelRef {
                id: destination.id,
                label: destination.label,
            });
    }

    events
        .into_iter()
        .map(|event| EventSummary {
            sources: source_labels.remove(&event.id).unwrap_or_default(),
            destinations: destination_labels.remove(&event.id).unwrap_or_default(),
            event,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn event(title: &str) -> Event {
        let now = Utc::now();
        Event {
            id: EventId::new(),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn source(label: &str, event_id: EventId) -> Source {
        let now = Utc::now();
        Source {
            id: SourceId::new(),
            label: label.to_string(),
            event_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn source_port(source_id: SourceId, channel: i32) -> SourcePort {
        let now = Utc::now();
        SourcePort {
            id: crate::common::SourcePortId::new(),
            port_type: "audio".to_string(),
            channel,
            description: None,
            source_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_rows_are_partitioned_by_event() {
        let first = event("First");
        let second = event("Second");
        let cam1 = source("Cam1", first.id);
        let cam2 = source("Cam2", second.id);
        let rows = EventGraphRows {
            source_ports: vec![source_port(cam1.id, 1), source_port(cam1.id, 2), source_port(cam2.id, 1)],
            sources: vec![cam1.clone(), cam2.clone()],
            ..Default::default()
        };

        let details = assemble_details(vec![first.clone(), second.clone()], rows);

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].event.id, first.id);
        assert_eq!(details[0].sources.len(), 1);
        assert_eq!(details[0].sources[0].ports.len(), 2);
        assert_eq!(details[1].sources[0].source.id, cam2.id);
        assert_eq!(details[1].sources[0].ports.len(), 1);
    }

    #[test]
    fn test_event_without_children_gets_empty_lists() {
        let lonely = event("Lonely");
        let details = assemble_details(vec![lonely], EventGraphRows::default());
        let detail = &details[0];
        assert!(detail.sources.is_empty());
        assert!(detail.destinations.is_empty());
        assert!(detail.partylines.is_empty());
        assert!(detail.flow_edges.is_empty());
    }

    #[test]
    fn test_summary_lists_labels_per_event() {
        let first = event("First");
        let second = event("Second");
        let cam = source("Cam1", second.id);
        let summaries = summarize(vec![first, second], vec![cam.clone()], vec![]);
        assert!(summaries[0].sources.is_empty());
        assert_eq!(summaries[1].sources, vec![LabelRef { id: cam.id, label: "Cam1".to_string() }]);
    }

    #[test]
    fn test_detail_serializes_flat_event_fields() {
        let detail = assemble_details(vec![event("Finals")], EventGraphRows::default()).remove(0);
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["title"], "Finals");
        assert!(json["createdAt"].is_string());
        assert!(json["flowEdges"].as_array().unwrap().is_empty());
    }
}
