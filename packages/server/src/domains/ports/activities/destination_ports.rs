use tracing::info;

use crate::common::{
    ensure_non_empty, DestinationId, DestinationPortId, EntityKind, RoutingError, RoutingResult,
};
use crate::domains::graph;
use crate::domains::ports::data::{
    CreateDestinationPortInput, PortChanges, PortPatch, ReplacePortInput,
};
use crate::domains::ports::models::DestinationPort;
use crate::kernel::ServerDeps;

pub async fn create_destination_port(
    input: CreateDestinationPortInput,
    deps: &ServerDeps,
) -> RoutingResult<DestinationPort> {
    let mut tx = deps.begin().await?;
    let port = graph::create_destination_port(tx.as_mut(), &input).await?;
    tx.commit().await?;
    Ok(port)
}

pub async fn get_destination_port(
    id: DestinationPortId,
    deps: &ServerDeps,
) -> RoutingResult<DestinationPort> {
    let mut tx = deps.begin().await?;
    let port = tx.find_destination_port(id).await?;
    tx.commit().await?;
    port.ok_or_else(|| RoutingError::not_found(EntityKind::DestinationPort, id))
}

pub async fn list_destination_ports_for_destination(
    destination_id: DestinationId,
    deps: &ServerDeps,
) -> RoutingResult<Vec<DestinationPort>> {
    let mut tx = deps.begin().await?;
    if tx.find_destination(destination_id).await?.is_none() {
        return Err(RoutingError::owner_not_found(
            EntityKind::Destination,
            destination_id,
        ));
    }
    let ports = tx
        .list_destination_ports_for_destinations(&[destination_id])
        .await?;
    tx.commit().await?;
    Ok(ports)
}

pub async fn replace_destination_port(
    id: DestinationPortId,
    input: ReplacePortInput,
    deps: &ServerDeps,
) -> RoutingResult<DestinationPort> {
    update(id, PortChanges::from(input), deps).await
}

pub async fn patch_destination_port(
    id: DestinationPortId,
    patch: PortPatch,
    deps: &ServerDeps,
) -> RoutingResult<DestinationPort> {
    ensure_non_empty(&patch)?;
    update(id, PortChanges::from(patch), deps).await
}

pub async fn delete_destination_port(
    id: DestinationPortId,
    deps: &ServerDeps,
) -> RoutingResult<u64> {
    let mut tx = deps.begin().await?;
    let edges = graph::delete_destination_port(tx.as_mut(), id).await?;
    tx.commit().await?;
    Ok(edges)
}

async fn update(
    id: DestinationPortId,
    changes: PortChanges,
    deps: &ServerDeps,
) -> RoutingResult<DestinationPort> {
    let mut tx = deps.begin().await?;
    let port = tx
        .update_destination_port(id, &changes)
        .await?
        .ok_or_else(|| RoutingError::not_found(EntityKind::DestinationPort, id))?;
    tx.commit().await?;

    info!(port_id = %id, "Updated destination port");
    Ok(port)
}
