//! Event mutation activities

use std::collections::HashSet;
use tracing::info;

use crate::common::{ensure_non_empty, EntityKind, EventId, RoutingError, RoutingResult};
use crate::domains::destinations::data::DestinationPatch;
use crate::domains::events::data::{
    CreateEventInput, EventDestinationInput, EventPartylineInput, EventPatch, EventSourceInput,
    ReplaceEventInput,
};
use crate::domains::events::detail::{load_event_detail, EventDetail};
use crate::domains::events::models::Event;
use crate::domains::graph::{self, CascadeReport};
use crate::domains::partylines::data::PartylinePatch;
use crate::domains::sources::data::SourcePatch;
use crate::kernel::{RoutingTx, ServerDeps};

pub async fn create_event(input: CreateEventInput, deps: &ServerDeps) -> RoutingResult<Event> {
    let mut tx = deps.begin().await?;
    let event = tx.insert_event(&input.title).await?;
    tx.commit().await?;

    info!(event_id = %event.id, title = %event.title, "Created event");
    Ok(event)
}

/// Replaces the title and reconciles whichever child lists were sent.
///
/// The whole reconcile commits or fails as one unit.
pub async fn replace_event(
    id: EventId,
    input: ReplaceEventInput,
    deps: &ServerDeps,
) -> RoutingResult<EventDetail> {
    let mut tx = deps.begin().await?;

    let title = EventPatch {
        title: Some(input.title),
    };
    if tx.update_event(id, &title).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::Event, id));
    }

    let mut report = CascadeReport::default();
    if let Some(sources) = input.sources {
        report.sources = reconcile_sources(tx.as_mut(), id, sources).await?;
    }
    if let Some(destinations) = input.destinations {
        report.destinations = reconcile_destinations(tx.as_mut(), id, destinations).await?;
    }
    if let Some(partylines) = input.partylines {
        report.partylines = reconcile_partylines(tx.as_mut(), id, partylines).await?;
    }

    let detail = load_event_detail(tx.as_mut(), id).await?;
    tx.commit().await?;

    info!(
        event_id = %id,
        removed_sources = report.sources,
        removed_destinations = report.destinations,
        removed_partylines = report.partylines,
        "Replaced event"
    );
    Ok(detail)
}

pub async fn patch_event(
    id: EventId,
    patch: EventPatch,
    deps: &ServerDeps,
) -> RoutingResult<EventDetail> {
    ensure_non_empty(&patch)?;

    let mut tx = deps.begin().await?;
    if tx.update_event(id, &patch).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::Event, id));
    }
    let detail = load_event_detail(tx.as_mut(), id).await?;
    tx.commit().await?;

    info!(event_id = %id, "Patched event");
    Ok(detail)
}

pub async fn delete_event(id: EventId, deps: &ServerDeps) -> RoutingResult<CascadeReport> {
    let mut tx = deps.begin().await?;
    let report = graph::delete_event(tx.as_mut(), id).await?;
    tx.commit().await?;
    Ok(report)
}

// =============================================================================
// Child reconciliation
// =============================================================================

/// Returns how many sources were removed.
async fn reconcile_sources(
    tx: &mut dyn RoutingTx,
    event_id: EventId,
    desired: Vec<EventSourceInput>,
) -> RoutingResult<u64> {
    let owned: HashSet<_> = tx
        .list_sources_for_events(&[event_id])
        .await?
        .into_iter()
        .map(|source| source.id)
        .collect();

    let mut kept = HashSet::new();
    for entry in desired {
        match entry.id {
            Some(id) if owned.contains(&id) => {
                let patch = SourcePatch {
                    label: Some(entry.label),
                    event_id: None,
                };
                tx.update_source(id, &patch).await?;
                kept.insert(id);
            }
            Some(id) => return Err(RoutingError::not_found(EntityKind::Source, id)),
            None => {
                tx.insert_source(&entry.label, event_id).await?;
            }
        }
    }

    let removed: Vec<_> = owned.difference(&kept).copied().collect();
    let report = graph::remove_sources(tx, &removed).await?;
    Ok(report.sources)
}

async fn reconcile_destinations(
    tx: &mut dyn RoutingTx,
    event_id: EventId,
    desired: Vec<EventDestinationInput>,
) -> RoutingResult<u64> {
    let owned: HashSet<_> = tx
        .list_destinations_for_events(&[event_id])
        .await?
        .into_iter()
        .map(|destination| destination.id)
        .collect();

    let mut kept = HashSet::new();
    for entry in desired {
        match entry.id {
            Some(id) if owned.contains(&id) => {
                let patch = DestinationPatch {
                    label: Some(entry.label),
                    event_id: None,
                };
                tx.update_destination(id, &patch).await?;
                kept.insert(id);
            }
            Some(id) => return Err(RoutingError::not_found(EntityKind::Destination, id)),
            None => {
                tx.insert_destination(&entry.label, event_id).await?;
            }
        }
    }

    let removed: Vec<_> = owned.difference(&kept).copied().collect();
    let report = graph::remove_destinations(tx, &removed).await?;
    Ok(report.destinations)
}

/// Partylines have no children, so unlisted ones are simply deleted.
async fn reconcile_partylines(
    tx: &mut dyn RoutingTx,
    event_id: EventId,
    desired: Vec<EventPartylineInput>,
) -> RoutingResult<u64> {
    let owned: HashSet<_> = tx
        .list_partylines_for_events(&[event_id])
        .await?
        .into_iter()
        .map(|partyline| partyline.id)
        .collect();

    let mut kept = HashSet::new();
    for entry in desired {
        match entry.id {
            Some(id) if owned.contains(&id) => {
                let patch = PartylinePatch {
                    title: Some(entry.title),
                };
                tx.update_partyline(id, &patch).await?;
                kept.insert(id);
            }
            Some(id) => return Err(RoutingError::not_found(EntityKind::Partyline, id)),
            None => {
                tx.insert_partyline(&entry.title, event_id).await?;
            }
        }
    }

    let mut removed = 0;
    for id in owned.difference(&kept) {
        if tx.delete_partyline(*id).await? {
            removed += 1;
        }
    }
    Ok(removed)
}
