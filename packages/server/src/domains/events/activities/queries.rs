//! Event read activities

use tracing::debug;

use crate::common::{EventId, RoutingResult};
use crate::domains::events::detail::{
    assemble_details, load_event_detail, summarize, EventDetail, EventGraphRows, EventSummary,
};
use crate::kernel::ServerDeps;

/// One event with its sources, destinations, partylines and flow edges.
pub async fn get_event_detail(id: EventId, deps: &ServerDeps) -> RoutingResult<EventDetail> {
    let mut tx = deps.begin().await?;
    let detail = load_event_detail(tx.as_mut(), id).await?;
    tx.commit().await?;
    Ok(detail)
}

/// Details of every event, assembled from one batched read per table.
pub async fn list_event_details(deps: &ServerDeps) -> RoutingResult<Vec<EventDetail>> {
    let mut tx = deps.begin().await?;
    let events = tx.list_events().await?;
    let event_ids: Vec<_> = events.iter().map(|event| event.id).collect();
    let rows = EventGraphRows::load(tx.as_mut(), &event_ids).await?;
    tx.commit().await?;

    debug!(
        events = events.len(),
        flow_edges = rows.flow_edges.len(),
        "Assembling event details"
    );
    Ok(assemble_details(events, rows))
}

pub async fn list_event_summaries(deps: &ServerDeps) -> RoutingResult<Vec<EventSummary>> {
    let mut tx = deps.begin().await?;
    let events = tx.list_events().await?;
    let event_ids: Vec<_> = events.iter().map(|event| event.id).collect();
    let sources = tx.list_sources_for_events(&event_ids).await?;
    let destinations = tx.list_destinations_for_events(&event_ids).await?;
    tx.commit().await?;

    Ok(summarize(events, sources, destinations))
}
