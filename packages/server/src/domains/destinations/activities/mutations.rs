use tracing::info;

use crate::common::{ensure_non_empty, DestinationId, EntityKind, RoutingError, RoutingResult};
use crate::domains::destinations::data::{
    CreateDestinationInput, DestinationPatch, ReplaceDestinationInput,
};
use crate::domains::destinations::models::Destination;
use crate::domains::graph::{self, CascadeReport};
use crate::kernel::{RoutingTx, ServerDeps};

pub async fn create_destination(
    input: CreateDestinationInput,
    deps: &ServerDeps,
) -> RoutingResult<Destination> {
    let mut tx = deps.begin().await?;
    if tx.find_event(input.event_id).await?.is_none() {
        return Err(RoutingError::owner_not_found(
            EntityKind::Event,
            input.event_id,
        ));
    }
    let destination = tx.insert_destination(&input.label, input.event_id).await?;
    tx.commit().await?;

    info!(destination_id = %destination.id, event_id = %destination.event_id, "Created destination");
    Ok(destination)
}

pub async fn replace_destination(
    id: DestinationId,
    input: ReplaceDestinationInput,
    deps: &ServerDeps,
) -> RoutingResult<Destination> {
    let mut tx = deps.begin().await?;
    let destination = apply_patch(tx.as_mut(), id, &DestinationPatch::from(input)).await?;
    tx.commit().await?;

    info!(destination_id = %id, "Replaced destination");
    Ok(destination)
}

pub async fn patch_destination(
    id: DestinationId,
    patch: DestinationPatch,
    deps: &ServerDeps,
) -> RoutingResult<Destination> {
    ensure_non_empty(&patch)?;

    let mut tx = deps.begin().await?;
    let destination = apply_patch(tx.as_mut(), id, &patch).await?;
    tx.commit().await?;

    info!(destination_id = %id, "Patched destination");
    Ok(destination)
}

/// Deletes the destination together with its ports and their flow edges.
pub async fn delete_destination(
    id: DestinationId,
    deps: &ServerDeps,
) -> RoutingResult<CascadeReport> {
    let mut tx = deps.begin().await?;
    let report = graph::delete_destination(tx.as_mut(), id).await?;
    tx.commit().await?;
    Ok(report)
}

/// A move to another event must name an existing event.
async fn apply_patch(
    tx: &mut dyn RoutingTx,
    id: DestinationId,
    patch: &DestinationPatch,
) -> RoutingResult<Destination> {
    if tx.find_destination(id).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::Destination, id));
    }
    if let Some(event_id) = patch.event_id {
        if tx.find_event(event_id).await?.is_none() {
            return Err(RoutingError::owner_not_found(EntityKind::Event, event_id));
        }
    }
    tx.update_destination(id, patch)
        .await?
        .ok_or_else(|| RoutingError::not_found(EntityKind::Destination, id))
}
