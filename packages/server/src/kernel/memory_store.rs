// In-memory routing store
//
// Used when no DATABASE_URL is configured and by the test suite. A
// transaction holds the state lock for its whole lifetime and works on a
// copy, which is swapped in on commit. Dropping it discards the copy, so
// rollback semantics match the Postgres store.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::traits::{BaseRoutingStore, RoutingTx};
use crate::common::{
    DestinationId, DestinationPortId, EventId, FlowEdgeId, PartylineId, SourceId, SourcePortId,
};
use crate::domains::destinations::data::DestinationPatch;
use crate::domains::destinations::models::Destination;
use crate::domains::events::data::EventPatch;
use crate::domains::events::models::Event;
use crate::domains::flow_edges::models::{EventFlowEdge, FlowEdge};
use crate::domains::partylines::data::PartylinePatch;
use crate::domains::partylines::models::Partyline;
use crate::domains::ports::data::{CreateDestinationPortInput, CreateSourcePortInput, PortChanges};
use crate::domains::ports::models::{DestinationPort, SourcePort};
use crate::domains::sources::data::SourcePatch;
use crate::domains::sources::models::Source;

/// Tables kept in insertion order, which doubles as creation order.
#[derive(Debug, Clone, Default)]
struct MemoryState {
    events: Vec<Event>,
    sources: Vec<Source>,
    destinations: Vec<Destination>,
    partylines: Vec<Partyline>,
    source_ports: Vec<SourcePort>,
    destination_ports: Vec<DestinationPort>,
    flow_edges: Vec<FlowEdge>,
}

#[derive(Clone, Default)]
pub struct MemoryRoutingStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRoutingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRoutingStore for MemoryRoutingStore {
    async fn begin(&self) -> Result<Box<dyn RoutingTx>> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryRoutingTx { guard, working }))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

pub struct MemoryRoutingTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

/// Removes matching rows and returns how many went.
fn remove_where<T>(rows: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> u64 {
    let before = rows.len();
    rows.retain(|row| !pred(row));
    (before - rows.len()) as u64
}

#[async_trait]
impl RoutingTx for MemoryRoutingTx {
    async fn find_event(&mut self, id: EventId) -> Result<Option<Event>> {
        Ok(self.working.events.iter().find(|e| e.id == id).cloned())
    }

    async fn list_events(&mut self) -> Result<Vec<Event>> {
        Ok(self.working.events.clone())
    }

    async fn insert_event(&mut self, title: &str) -> Result<Event> {
        let now = Utc::now();
        let event = Event {
            id: EventId::new(),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.working.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&mut self, id: EventId, patch: &EventPatch) -> Result<Option<Event>> {
        let Some(event) = self.working.events.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            event.title = title.clone();
        }
        event.updated_at = Utc::now();
        Ok(Some(event.clone()))
    }

    async fn delete_event(&mut self, id: EventId) -> Result<bool> {
        Ok(remove_where(&mut self.working.events, |e| e.id == id) > 0)
    }

    async fn find_source(&mut self, id: SourceId) -> Result<Option<Source>> {
        Ok(self.working.sources.iter().find(|s| s.id == id).cloned())
    }

    async fn list_sources(&mut self) -> Result<Vec<Source>> {
        Ok(self.working.sources.clone())
    }

    async fn list_sources_for_events(&mut self, event_ids: &[EventId]) -> Result<Vec<Source>> {
        Ok(self
            .working
            .sources
            .iter()
            .filter(|s| event_ids.contains(&s.event_id))
            .cloned()
            .collect())
    }

    async fn insert_source(&mut self, label: &str, event_id: EventId) -> Result<Source> {
        let now = Utc::now();
        let source = Source {
            id: SourceId::new(),
            label: label.to_string(),
            event_id,
            created_at: now,
            updated_at: now,
        };
        self.working.sources.push(source.clone());
        Ok(source)
    }

    async fn update_source(
        &mut self,
        id: SourceId,
        patch: &SourcePatch,
    ) -> Result<Option<Source>> {
        let Some(source) = self.working.sources.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(label) = &patch.label {
            source.label = label.clone();
        }
        if let Some(event_id) = patch.event_id {
            source.event_id = event_id;
        }
        source.updated_at = Utc::now();
        Ok(Some(source.clone()))
    }

    async fn delete_source(&mut self, id: SourceId) -> Result<bool> {
        Ok(remove_where(&mut self.working.sources, |s| s.id == id) > 0)
    }

    async fn find_destination(&mut self, id: DestinationId) -> Result<Option<Destination>> {
        Ok(self.working.destinations.iter().find(|d| d.id == id).cloned())
    }

    async fn list_destinations(&mut self) -> Result<Vec<Destination>> {
        Ok(self.working.destinations.clone())
    }

    async fn list_destinations_for_events(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<Destination>> {
        Ok(self
            .working
            .destinations
            .iter()
            .filter(|d| event_ids.contains(&d.event_id))
            .cloned()
            .collect())
    }

    async fn insert_destination(&mut self, label: &str, event_id: EventId) -> Result<Destination> {
        let now = Utc::now();
        let destination = Destination {
            id: DestinationId::new(),
            label: label.to_string(),
            event_id,
            created_at: now,
            updated_at: now,
        };
        self.working.destinations.push(destination.clone());
        Ok(destination)
    }

    async fn update_destination(
        &mut self,
        id: DestinationId,
        patch: &DestinationPatch,
    ) -> Result<Option<Destination>> {
        let Some(destination) = self.working.destinations.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(label) = &patch.label {
            destination.label = label.clone();
        }
        if let Some(event_id) = patch.event_id {
            destination.event_id = event_id;
        }
        destination.updated_at = Utc::now();
        Ok(Some(destination.clone()))
    }

    async fn delete_destination(&mut self, id: DestinationId) -> Result<bool> {
        Ok(remove_where(&mut self.working.destinations, |d| d.id == id) > 0)
    }

    async fn find_partyline(&mut self, id: PartylineId) -> Result<Option<Partyline>> {
        Ok(self.working.partylines.iter().find(|p| p.id == id).cloned())
    }

    async fn list_partylines(&mut self) -> Result<Vec<Partyline>> {
        Ok(self.working.partylines.clone())
    }

    async fn list_partylines_for_events(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<Partyline>> {
        Ok(self
            .working
            .partylines
            .iter()
            .filter(|p| event_ids.contains(&p.event_id))
            .cloned()
            .collect())
    }

    async fn insert_partyline(&mut self, title: &str, event_id: EventId) -> Result<Partyline> {
        let now = Utc::now();
        let partyline = Partyline {
            id: PartylineId::new(),
            title: title.to_string(),
            event_id,
            created_at: now,
            updated_at: now,
        };
        self.working.partylines.push(partyline.clone());
        Ok(partyline)
    }

    async fn update_partyline(
        &mut self,
        id: PartylineId,
        patch: &PartylinePatch,
    ) -> Result<Option<Partyline>> {
        let Some(partyline) = self.working.partylines.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            partyline.title = title.clone();
        }
        partyline.updated_at = Utc::now();
        Ok(Some(partyline.clone()))
    }

    async fn delete_partyline(&mut self, id: PartylineId) -> Result<bool> {
        Ok(remove_where(&mut self.working.partylines, |p| p.id == id) > 0)
    }

    async fn delete_partylines_for_event(&mut self, event_id: EventId) -> Result<u64> {
        Ok(remove_where(&mut self.working.partylines, |p| {
            p.event_id == event_id
        }))
    }

    async fn find_source_port(&mut self, id: SourcePortId) -> Result<Option<SourcePort>> {
        Ok(self.working.source_ports.iter().find(|p| p.id == id).cloned())
    }

    async fn list_source_ports_for_sources(
        &mut self,
        source_ids: &[SourceId],
    ) -> Result<Vec<SourcePort>> {
        Ok(self
            .working
            .source_ports
            .iter()
            .filter(|p| source_ids.contains(&p.source_id))
            .cloned()
            .collect())
    }

    async fn insert_source_port(&mut self, input: &CreateSourcePortInput) -> Result<SourcePort> {
        let now = Utc::now();
        let port = SourcePort {
            id: SourcePortId::new(),
            port_type: input.port_type.clone(),
            channel: input.channel,
            description: input.description.clone(),
            source_id: input.source_id,
            created_at: now,
            updated_at: now,
        };
        self.working.source_ports.push(port.clone());
        Ok(port)
    }

    async fn update_source_port(
        &mut self,
        id: SourcePortId,
        changes: &PortChanges,
    ) -> Result<Option<SourcePort>> {
        let Some(port) = self.working.source_ports.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(port_type) = &changes.port_type {
            port.port_type = port_type.clone();
        }
        if let Some(channel) = changes.channel {
            port.channel = channel;
        }
        if let Some(description) = &changes.description {
            port.description = description.clone();
        }
        port.updated_at = Utc::now();
        Ok(Some(port.clone()))
    }

    async fn delete_source_port(&mut self, id: SourcePortId) -> Result<bool> {
        Ok(remove_where(&mut self.working.source_ports, |p| p.id == id) > 0)
    }

    async fn delete_source_ports(&mut self, ids: &[SourcePortId]) -> Result<u64> {
        Ok(remove_where(&mut self.working.source_ports, |p| {
            ids.contains(&p.id)
        }))
    }

    async fn find_destination_port(
        &mut self,
        id: DestinationPortId,
    ) -> Result<Option<DestinationPort>> {
        Ok(self
            .working
            .destination_ports
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_destination_ports_for_destinations(
        &mut self,
        destination_ids: &[DestinationId],
    ) -> Result<Vec<DestinationPort>> {
        Ok(self
            .working
            .destination_ports
            .iter()
            .filter(|p| destination_ids.contains(&p.destination_id))
            .cloned()
            .collect())
    }

    async fn insert_destination_port(
        &mut self,
        input: &CreateDestinationPortInput,
    ) -> Result<DestinationPort> {
        let now = Utc::now();
        let port = DestinationPort {
            id: DestinationPortId::new(),
            port_type: input.port_type.clone(),
            channel: input.channel,
            description: input.description.clone(),
            destination_id: input.destination_id,
            created_at: now,
            updated_at: now,
        };
        self.working.destination_ports.push(port.clone());
        Ok(port)
    }

    async fn update_destination_port(
        &mut self,
        id: DestinationPortId,
        changes: &PortChanges,
    ) -> Result<Option<DestinationPort>> {
        let Some(port) = self
            .working
            .destination_ports
            .iter_mut()
            .find(|p| p.id == id)
        else {
            return Ok(None);
        };
        if let Some(port_type) = &changes.port_type {
            port.port_type = port_type.clone();
        }
        if let Some(channel) = changes.channel {
            port.channel = channel;
        }
        if let Some(description) = &changes.description {
            port.description = description.clone();
        }
        port.updated_at = Utc::now();
        Ok(Some(port.clone()))
    }

    async fn delete_destination_port(&mut self, id: DestinationPortId) -> Result<bool> {
        Ok(remove_where(&mut self.working.destination_ports, |p| p.id == id) > 0)
    }

    async fn delete_destination_ports(&mut self, ids: &[DestinationPortId]) -> Result<u64> {
        Ok(remove_where(&mut self.working.destination_ports, |p| {
            ids.contains(&p.id)
        }))
    }

    async fn find_flow_edge(&mut self, id: FlowEdgeId) -> Result<Option<FlowEdge>> {
        Ok(self.working.flow_edges.iter().find(|e| e.id == id).cloned())
    }

    async fn list_flow_edges(&mut self) -> Result<Vec<FlowEdge>> {
        Ok(self.working.flow_edges.clone())
    }

    async fn list_flow_edges_for_events(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<EventFlowEdge>> {
        let state = &self.working;
        let edges = state
            .flow_edges
            .iter()
            .filter_map(|edge| {
                let port = state
                    .source_ports
                    .iter()
                    .find(|p| p.id == edge.source_port_id)?;
                let source = state.sources.iter().find(|s| s.id == port.source_id)?;
                event_ids.contains(&source.event_id).then(|| EventFlowEdge {
                    event_id: source.event_id,
                    edge: edge.clone(),
                })
            })
            .collect();
        Ok(edges)
    }

    async fn insert_flow_edge(
        &mut self,
        source_port_id: SourcePortId,
        destination_port_id: DestinationPortId,
    ) -> Result<FlowEdge> {
        let now = Utc::now();
        let edge = FlowEdge {
            id: FlowEdgeId::new(),
            source_port_id,
            destination_port_id,
            created_at: now,
            updated_at: now,
        };
        self.working.flow_edges.push(edge.clone());
        Ok(edge)
    }

    async fn delete_flow_edge(&mut self, id: FlowEdgeId) -> Result<bool> {
        Ok(remove_where(&mut self.working.flow_edges, |e| e.id == id) > 0)
    }

    async fn delete_flow_edges_for_source_ports(&mut self, ids: &[SourcePortId]) -> Result<u64> {
        let ids: HashSet<SourcePortId> = ids.iter().copied().collect();
        Ok(remove_where(&mut self.working.flow_edges, |e| {
            ids.contains(&e.source_port_id)
        }))
    }

    async fn delete_flow_edges_for_destination_ports(
        &mut self,
        ids: &[DestinationPortId],
    ) -> Result<u64> {
        let ids: HashSet<DestinationPortId> = ids.iter().copied().collect();
        Ok(remove_where(&mut self.working.flow_edges, |e| {
            ids.contains(&e.destination_port_id)
        }))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryRoutingTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commit_publishes_changes() {
        let store = MemoryRoutingStore::new();

        let mut tx = store.begin().await.unwrap();
        let event = tx.insert_event("Eurovision 2049").await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.find_event(event.id).await.unwrap(), Some(event));
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let store = MemoryRoutingStore::new();

        let mut tx = store.begin().await.unwrap();
        let event = tx.insert_event("Kept").await.unwrap();
        tx.commit().await.unwrap();

        {
            let mut tx = store.begin().await.unwrap();
            assert!(tx.delete_event(event.id).await.unwrap());
            tx.insert_event("Discarded").await.unwrap();
        }

        let mut tx = store.begin().await.unwrap();
        let events = tx.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Kept");
    }

    #[tokio::test]
    async fn test_delete_reports_missing_rows() {
        let store = MemoryRoutingStore::new();
        let mut tx = store.begin().await.unwrap();
        assert!(!tx.delete_flow_edge(FlowEdgeId::new()).await.unwrap());
        assert!(tx.update_event(EventId::new(), &EventPatch::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_edges_for_events_follow_source_ownership() {
        let store = MemoryRoutingStore::new();
        let mut tx = store.begin().await.unwrap();

        let event = tx.insert_event("Main").await.unwrap();
        let other = tx.insert_event("Other").await.unwrap();
        let source = tx.insert_source("Cam1", event.id).await.unwrap();
        let destination = tx.insert_destination("Out1", other.id).await.unwrap();
        let source_port = tx
            .insert_source_port(&CreateSourcePortInput {
                port_type: "video".into(),
                channel: 1,
                description: None,
                source_id: source.id,
            })
            .await
            .unwrap();
        let destination_port = tx
            .insert_destination_port(&CreateDestinationPortInput {
                port_type: "video".into(),
                channel: 1,
                description: None,
                destination_id: destination.id,
            })
            .await
            .unwrap();
        let edge = tx
            .insert_flow_edge(source_port.id, destination_port.id)
            .await
            .unwrap();

        let tagged = tx.list_flow_edges_for_events(&[event.id]).await.unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].event_id, event.id);
        assert_eq!(tagged[0].edge.id, edge.id);

        // The destination side does not make an edge belong to an event.
        assert!(tx
            .list_flow_edges_for_events(&[other.id])
            .await
            .unwrap()
            .is_empty());
    }
}
