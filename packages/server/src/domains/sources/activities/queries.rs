use crate::common::{EntityKind, RoutingError, RoutingResult, SourceId};
use crate::domains::sources::data::ListSourcesQuery;
use crate::domains::sources::models::Source;
use crate::kernel::ServerDeps;

pub async fn get_source(id: SourceId, deps: &ServerDeps) -> RoutingResult<Source> {
    let mut tx = deps.begin().await?;
    let source = tx.find_source(id).await?;
    tx.commit().await?;
    source.ok_or_else(|| RoutingError::not_found(EntityKind::Source, id))
}

/// All sources, or only those of `query.event_id` when given.
pub async fn list_sources(query: ListSourcesQuery, deps: &ServerDeps) -> RoutingResult<Vec<Source>> {
    let mut tx = deps.begin().await?;
    let sources = match query.event_id {
        Some(event_id) => tx.list_sources_for_events(&[event_id]).await?,
        None => tx.list_sources().await?,
    };
    tx.commit().await?;
    Ok(sources)
}
