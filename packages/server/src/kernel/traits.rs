// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Referential rules (cascades, owner checks) live in domains::graph and are
// written once against RoutingTx.
//
// Naming convention: Base* for trait names (e.g., BaseRoutingStore)

use anyhow::Result;
use async_trait::async_trait;

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

// =============================================================================
// Routing Store Trait (Infrastructure - entity persistence)
// =============================================================================

#[async_trait]
pub trait BaseRoutingStore: Send + Sync {
    /// Open a unit of work. Nothing it does is visible to others until
    /// `commit`; dropping it uncommitted rolls everything back.
    async fn begin(&self) -> Result<Box<dyn RoutingTx>>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<()>;
}

/// Row-level primitives over every routing entity, scoped to one transaction.
///
/// `find_*` return `None` for missing rows, `update_*` return `None` when the
/// row does not exist, and `delete_*` return `false` when nothing was deleted,
/// so callers can tell a miss from a success. Lists come back in creation
/// order. None of these enforce cross-entity rules.
#[async_trait]
pub trait RoutingTx: Send {
    // --- events -------------------------------------------------------------
    async fn find_event(&mut self, id: EventId) -> Result<Option<Event>>;
    async fn list_events(&mut self) -> Result<Vec<Event>>;
    async fn insert_event(&mut self, title: &str) -> Result<Event>;
    async fn update_event(&mut self, id: EventId, patch: &EventPatch) -> Result<Option<Event>>;
    async fn delete_event(&mut self, id: EventId) -> Result<bool>;

    // --- sources ------------------------------------------------------------
    async fn find_source(&mut self, id: SourceId) -> Result<Option<Source>>;
    async fn list_sources(&mut self) -> Result<Vec<Source>>;
    async fn list_sources_for_events(&mut self, event_ids: &[EventId]) -> Result<Vec<Source>>;
    async fn insert_source(&mut self, label: &str, event_id: EventId) -> Result<Source>;
    async fn update_source(&mut self, id: SourceId, patch: &SourcePatch)
        -> Result<Option<Source>>;
    async fn delete_source(&mut self, id: SourceId) -> Result<bool>;

    // --- destinations -------------------------------------------------------
    async fn find_destination(&mut self, id: DestinationId) -> Result<Option<Destination>>;
    async fn list_destinations(&mut self) -> Result<Vec<Destination>>;
    async fn list_destinations_for_events(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<Destination>>;
    async fn insert_destination(&mut self, label: &str, event_id: EventId) -> Result<Destination>;
    async fn update_destination(
        &mut self,
        id: DestinationId,
        patch: &DestinationPatch,
    ) -> Result<Option<Destination>>;
    async fn delete_destination(&mut self, id: DestinationId) -> Result<bool>;

    // --- partylines ---------------------------------------------------------
    async fn find_partyline(&mut self, id: PartylineId) -> Result<Option<Partyline>>;
    async fn list_partylines(&mut self) -> Result<Vec<Partyline>>;
    async fn list_partylines_for_events(&mut self, event_ids: &[EventId])
        -> Result<Vec<Partyline>>;
    async fn insert_partyline(&mut self, title: &str, event_id: EventId) -> Result<Partyline>;
    async fn update_partyline(
        &mut self,
        id: PartylineId,
        patch: &PartylinePatch,
    ) -> Result<Option<Partyline>>;
    async fn delete_partyline(&mut self, id: PartylineId) -> Result<bool>;
    async fn delete_partylines_for_event(&mut self, event_id: EventId) -> Result<u64>;

    // --- source ports -------------------------------------------------------
    async fn find_source_port(&mut self, id: SourcePortId) -> Result<Option<SourcePort>>;
    async fn list_source_ports_for_sources(
        &mut self,
        source_ids: &[SourceId],
    ) -> Result<Vec<SourcePort>>;
    async fn insert_source_port(&mut self, input: &CreateSourcePortInput) -> Result<SourcePort>;
    async fn update_source_port(
        &mut self,
        id: SourcePortId,
        changes: &PortChanges,
    ) -> Result<Option<SourcePort>>;
    async fn delete_source_port(&mut self, id: SourcePortId) -> Result<bool>;
    async fn delete_source_ports(&mut self, ids: &[SourcePortId]) -> Result<u64>;

    // --- destination ports --------------------------------------------------
    async fn find_destination_port(
        &mut self,
        id: DestinationPortId,
    ) -> Result<Option<DestinationPort>>;
    async fn list_destination_ports_for_destinations(
        &mut self,
        destination_ids: &[DestinationId],
    ) -> Result<Vec<DestinationPort>>;
    async fn insert_destination_port(
        &mut self,
        input: &CreateDestinationPortInput,
    ) -> Result<DestinationPort>;
    async fn update_destination_port(
        &mut self,
        id: DestinationPortId,
        changes: &PortChanges,
    ) -> Result<Option<DestinationPort>>;
    async fn delete_destination_port(&mut self, id: DestinationPortId) -> Result<bool>;
    async fn delete_destination_ports(&mut self, ids: &[DestinationPortId]) -> Result<u64>;

    // --- flow edges ---------------------------------------------------------
    async fn find_flow_edge(&mut self, id: FlowEdgeId) -> Result<Option<FlowEdge>>;
    async fn list_flow_edges(&mut self) -> Result<Vec<FlowEdge>>;
    /// Edges whose source port belongs to a source of one of `event_ids`,
    /// each tagged with that event.
    async fn list_flow_edges_for_events(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<EventFlowEdge>>;
    async fn insert_flow_edge(
        &mut self,
        source_port_id: SourcePortId,
        destination_port_id: DestinationPortId,
    ) -> Result<FlowEdge>;
    async fn delete_flow_edge(&mut self, id: FlowEdgeId) -> Result<bool>;
    async fn delete_flow_edges_for_source_ports(&mut self, ids: &[SourcePortId]) -> Result<u64>;
    async fn delete_flow_edges_for_destination_ports(
        &mut self,
        ids: &[DestinationPortId],
    ) -> Result<u64>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
