use tracing::info;

use crate::common::{ensure_non_empty, EntityKind, RoutingError, RoutingResult, SourceId};
use crate::domains::graph::{self, CascadeReport};
use crate::domains::sources::data::{CreateSourceInput, ReplaceSourceInput, SourcePatch};
use crate::domains::sources::models::Source;
use crate::kernel::{RoutingTx, ServerDeps};

pub async fn create_source(input: CreateSourceInput, deps: &ServerDeps) -> RoutingResult<Source> {
    let mut tx = deps.begin().await?;
    if tx.find_event(input.event_id).await?.is_none() {
        return Err(RoutingError::owner_not_found(
            EntityKind::Event,
            input.event_id,
        ));
    }
    let source = tx.insert_source(&input.label, input.event_id).await?;
    tx.commit().await?;

    info!(source_id = %source.id, event_id = %source.event_id, "Created source");
    Ok(source)
}

pub async fn replace_source(
    id: SourceId,
    input: ReplaceSourceInput,
    deps: &ServerDeps,
) -> RoutingResult<Source> {
    let mut tx = deps.begin().await?;
    let source = apply_patch(tx.as_mut(), id, &SourcePatch::from(input)).await?;
    tx.commit().await?;

    info!(source_id = %id, "Replaced source");
    Ok(source)
}

pub async fn patch_source(
    id: SourceId,
    patch: SourcePatch,
    deps: &ServerDeps,
) -> RoutingResult<Source> {
    ensure_non_empty(&patch)?;

    let mut tx = deps.begin().await?;
    let source = apply_patch(tx.as_mut(), id, &patch).await?;
    tx.commit().await?;

    info!(source_id = %id, "Patched source");
    Ok(source)
}

/// Deletes the source together with its ports and their flow edges.
pub async fn delete_source(id: SourceId, deps: &ServerDeps) -> RoutingResult<CascadeReport> {
    let mut tx = deps.begin().await?;
    let report = graph::delete_source(tx.as_mut(), id).await?;
    tx.commit().await?;
    Ok(report)
}

/// A move to another event must name an existing event.
async fn apply_patch(
    tx: &mut dyn RoutingTx,
    id: SourceId,
    patch: &SourcePatch,
) -> RoutingResult<Source> {
    if tx.find_source(id).await?.is_none() {
        return Err(RoutingError::not_found(EntityKind::Source, id));
    }
    if let Some(event_id) = patch.event_id {
        if tx.find_event(event_id).await?.is_none() {
            return Err(RoutingError::owner_not_found(EntityKind::Event, event_id));
        }
    }
    tx.update_source(id, patch)
        .await?
        .ok_or_else(|| RoutingError::not_found(EntityKind::Source, id))
}
