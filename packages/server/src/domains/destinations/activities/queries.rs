use crate::common::{DestinationId, EntityKind, RoutingError, RoutingResult};
use crate::domains::destinations::data::ListDestinationsQuery;
use crate::domains::destinations::models::Destination;
use crate::kernel::ServerDeps;

pub async fn get_destination(
    id: DestinationId,
    deps: &ServerDeps,
) -> RoutingResult<Destination> {
    let mut tx = deps.begin().await?;
    let destination = tx.find_destination(id).await?;
    tx.commit().await?;
    destination.ok_or_else(|| RoutingError::not_found(EntityKind::Destination, id))
}

/// All destinations, or only those of `query.event_id` when given.
pub async fn list_destinations(
    query: ListDestinationsQuery,
    deps: &ServerDeps,
) -> RoutingResult<Vec<Destination>> {
    let mut tx = deps.begin().await?;
    let destinations = match query.event_id {
        Some(event_id) => tx.list_destinations_for_events(&[event_id]).await?,
        None => tx.list_destinations().await?,
    };
    tx.commit().await?;
    Ok(destinations)
}
