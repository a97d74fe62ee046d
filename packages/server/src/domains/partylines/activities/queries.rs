use crate::common::{EntityKind, PartylineId, RoutingError, RoutingResult};
use crate::domains::partylines::data::ListPartylinesQuery;
use crate::domains::partylines::models::Partyline;
use crate::kernel::ServerDeps;

pub async fn get_partyline(id: PartylineId, deps: &ServerDeps) -> RoutingResult<Partyline> {
    let mut tx = deps.begin().await?;
    let partyline = tx.find_partyline(id).await?;
    tx.commit().await?;
    partyline.ok_or_else(|| RoutingError::not_found(EntityKind::Partyline, id))
}

pub async fn list_partylines(
    query: ListPartylinesQuery,
    deps: &ServerDeps,
) -> RoutingResult<Vec<Partyline>> {
    let mut tx = deps.begin().await?;
    let partylines = match query.event_id {
        Some(event_id) => tx.list_partylines_for_events(&[event_id]).await?,
        None => tx.list_partylines().await?,
    };
    tx.commit().await?;
    Ok(partylines)
}
