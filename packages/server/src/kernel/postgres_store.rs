// Postgres-backed routing store
//
// Every RoutingTx wraps one sqlx transaction. The SQL itself lives on the
// model types; this file only routes trait calls to them.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

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

#[derive(Clone)]
pub struct PgRoutingStore {
    pool: PgPool,
}

impl PgRoutingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseRoutingStore for PgRoutingStore {
    async fn begin(&self) -> Result<Box<dyn RoutingTx>> {
        let tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;
        Ok(Box::new(PgRoutingTx { tx }))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct PgRoutingTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RoutingTx for PgRoutingTx {
    async fn find_event(&mut self, id: EventId) -> Result<Option<Event>> {
        Event::find_by_id(id, &mut self.tx).await
    }

    async fn list_events(&mut self) -> Result<Vec<Event>> {
        Event::find_all(&mut self.tx).await
    }

    async fn insert_event(&mut self, title: &str) -> Result<Event> {
        Event::insert(EventId::new(), title, &mut self.tx).await
    }

    async fn update_event(&mut self, id: EventId, patch: &EventPatch) -> Result<Option<Event>> {
        Event::update(id, patch.title.as_deref(), &mut self.tx).await
    }

    async fn delete_event(&mut self, id: EventId) -> Result<bool> {
        Event::delete(id, &mut self.tx).await
    }

    async fn find_source(&mut self, id: SourceId) -> Result<Option<Source>> {
        Source::find_by_id(id, &mut self.tx).await
    }

    async fn list_sources(&mut self) -> Result<Vec<Source>> {
        Source::find_all(&mut self.tx).await
    }

    async fn list_sources_for_events(&mut self, event_ids: &[EventId]) -> Result<Vec<Source>> {
        Source::find_for_events(event_ids, &mut self.tx).await
    }

    async fn insert_source(&mut self, label: &str, event_id: EventId) -> Result<Source> {
        Source::insert(SourceId::new(), label, event_id, &mut self.tx).await
    }

    async fn update_source(
        &mut self,
        id: SourceId,
        patch: &SourcePatch,
    ) -> Result<Option<Source>> {
        Source::update(id, patch.label.as_deref(), patch.event_id, &mut self.tx).await
    }

    async fn delete_source(&mut self, id: SourceId) -> Result<bool> {
        Source::delete(id, &mut self.tx).await
    }

    async fn find_destination(&mut self, id: DestinationId) -> Result<Option<Destination>> {
        Destination::find_by_id(id, &mut self.tx).await
    }

    async fn list_destinations(&mut self) -> Result<Vec<Destination>> {
        Destination::find_all(&mut self.tx).await
    }

    async fn list_destinations_for_events(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<Destination>> {
        Destination::find_for_events(event_ids, &mut self.tx).await
    }

    async fn insert_destination(&mut self, label: &str, event_id: EventId) -> Result<Destination> {
        Destination::insert(DestinationId::new(), label, event_id, &mut self.tx).await
    }

    async fn update_destination(
        &mut self,
        id: DestinationId,
        patch: &DestinationPatch,
    ) -> Result<Option<Destination>> {
        Destination::update(id, patch.label.as_deref(), patch.event_id, &mut self.tx).await
    }

    async fn delete_destination(&mut self, id: DestinationId) -> Result<bool> {
        Destination::delete(id, &mut self.tx).await
    }

    async fn find_partyline(&mut self, id: PartylineId) -> Result<Option<Partyline>> {
        Partyline::find_by_id(id, &mut self.tx).await
    }

    async fn list_partylines(&mut self) -> Result<Vec<Partyline>> {
        Partyline::find_all(&mut self.tx).await
    }

    async fn list_partylines_for_events(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<Partyline>> {
        Partyline::find_for_events(event_ids, &mut self.tx).await
    }

    async fn insert_partyline(&mut self, title: &str, event_id: EventId) -> Result<Partyline> {
        Partyline::insert(PartylineId::new(), title, event_id, &mut self.tx).await
    }

    async fn update_partyline(
        &mut self,
        id: PartylineId,
        patch: &PartylinePatch,
    ) -> Result<Option<Partyline>> {
        Partyline::update(id, patch.title.as_deref(), &mut self.tx).await
    }

    async fn delete_partyline(&mut self, id: PartylineId) -> Result<bool> {
        Partyline::delete(id, &mut self.tx).await
    }

    async fn delete_partylines_for_event(&mut self, event_id: EventId) -> Result<u64> {
        Partyline::delete_for_event(event_id, &mut self.tx).await
    }

    async fn find_source_port(&mut self, id: SourcePortId) -> Result<Option<SourcePort>> {
        SourcePort::find_by_id(id, &mut self.tx).await
    }

    async fn list_source_ports_for_sources(
        &mut self,
        source_ids: &[SourceId],
    ) -> Result<Vec<SourcePort>> {
        SourcePort::find_for_sources(source_ids, &mut self.tx).await
    }

    async fn insert_source_port(&mut self, input: &CreateSourcePortInput) -> Result<SourcePort> {
        SourcePort::insert(
            SourcePortId::new(),
            &input.port_type,
            input.channel,
            input.description.as_deref(),
            input.source_id,
            &mut self.tx,
        )
        .await
    }

    async fn update_source_port(
        &mut self,
        id: SourcePortId,
        changes: &PortChanges,
    ) -> Result<Option<SourcePort>> {
        SourcePort::update(
            id,
            changes.port_type.as_deref(),
            changes.channel,
            changes.description.as_ref().map(Option::as_deref),
            &mut self.tx,
        )
        .await
    }

    async fn delete_source_port(&mut self, id: SourcePortId) -> Result<bool> {
        SourcePort::delete(id, &mut self.tx).await
    }

    async fn delete_source_ports(&mut self, ids: &[SourcePortId]) -> Result<u64> {
        SourcePort::delete_many(ids, &mut self.tx).await
    }

    async fn find_destination_port(
        &mut self,
        id: DestinationPortId,
    ) -> Result<Option<DestinationPort>> {
        DestinationPort::find_by_id(id, &mut self.tx).await
    }

    async fn list_destination_ports_for_destinations(
        &mut self,
        destination_ids: &[DestinationId],
    ) -> Result<Vec<DestinationPort>> {
        DestinationPort::find_for_destinations(destination_ids, &mut self.tx).await
    }

    async fn insert_destination_port(
        &mut self,
        input: &CreateDestinationPortInput,
    ) -> Result<DestinationPort> {
        DestinationPort::insert(
            DestinationPortId::new(),
            &input.port_type,
            input.channel,
            input.description.as_deref(),
            input.destination_id,
            &mut self.tx,
        )
        .await
    }

    async fn update_destination_port(
        &mut self,
        id: DestinationPortId,
        changes: &PortChanges,
    ) -> Result<Option<DestinationPort>> {
        DestinationPort::update(
            id,
            changes.port_type.as_deref(),
            changes.channel,
            changes.description.as_ref().map(Option::as_deref),
            &mut self.tx,
        )
        .await
    }

    async fn delete_destination_port(&mut self, id: DestinationPortId) -> Result<bool> {
        DestinationPort::delete(id, &mut self.tx).await
    }

    async fn delete_destination_ports(&mut self, ids: &[DestinationPortId]) -> Result<u64> {
        DestinationPort::delete_many(ids, &mut self.tx).await
    }

    async fn find_flow_edge(&mut self, id: FlowEdgeId) -> Result<Option<FlowEdge>> {
        FlowEdge::find_by_id(id, &mut self.tx).await
    }

    async fn list_flow_edges(&mut self) -> Result<Vec<FlowEdge>> {
        FlowEdge::find_all(&mut self.tx).await
    }

    async fn list_flow_edges_for_events(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<EventFlowEdge>> {
        FlowEdge::find_for_events(event_ids, &mut self.tx).await
    }

    async fn insert_flow_edge(
        &mut self,
        source_port_id: SourcePortId,
        destination_port_id: DestinationPortId,
    ) -> Result<FlowEdge> {
        FlowEdge::insert(
            FlowEdgeId::new(),
            source_port_id,
            destination_port_id,
            &mut self.tx,
        )
        .await
    }

    async fn delete_flow_edge(&mut self, id: FlowEdgeId) -> Result<bool> {
        FlowEdge::delete(id, &mut self.tx).await
    }

    async fn delete_flow_edges_for_source_ports(&mut self, ids: &[SourcePortId]) -> Result<u64> {
        FlowEdge::delete_for_source_ports(ids, &mut self.tx).await
    }

    async fn delete_flow_edges_for_destination_ports(
        &mut self,
        ids: &[DestinationPortId],
    ) -> Result<u64> {
        FlowEdge::delete_for_destination_ports(ids, &mut self.tx).await
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .commit()
            .await
            .context("Failed to commit transaction")
    }
}
