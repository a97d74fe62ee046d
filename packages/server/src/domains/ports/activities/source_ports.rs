use tracing::info;

use crate::common::{
    ensure_non_empty, EntityKind, RoutingError, RoutingResult, SourceId, SourcePortId,
};
use crate::domains::graph;
use crate::domains::ports::data::{CreateSourcePortInput, PortChanges, PortPatch, ReplacePortInput};
use crate::domains::ports::models::SourcePort;
use crate::kernel::ServerDeps;

pub async fn create_source_port(
    input: CreateSourcePortInput,
    deps: &ServerDeps,
) -> RoutingResult<SourcePort> {
    let mut tx = deps.begin().await?;
    let port = graph::create_source_port(tx.as_mut(), &input).await?;
    tx.commit().await?;
    Ok(port)
}

pub async fn get_source_port(id: SourcePortId, deps: &ServerDeps) -> RoutingResult<SourcePort> {
    let mut tx = deps.begin().await?;
    let port = tx.find_source_port(id).await?;
    tx.commit().await?;
    port.ok_or_else(|| RoutingError::not_found(EntityKind::SourcePort, id))
}

/// Ports of one source. An unknown source is a caller error, not an empty list.
pub async fn list_source_ports_for_source(
    source_id: SourceId,
    deps: &ServerDeps,
) -> RoutingResult<Vec<SourcePort>> {
    let mut tx = deps.begin().await?;
    if tx.find_source(source_id).await?.is_none() {
        return Err(RoutingError::owner_not_found(EntityKind::Source, source_id));
    }
    let ports = tx.list_source_ports_for_sources(&[source_id]).await?;
    tx.commit().await?;
    Ok(ports)
}

pub async fn replace_source_port(
    id: SourcePortId,
    input: ReplacePortInput,
    deps: &ServerDeps,
) -> RoutingResult<SourcePort> {
    update(id, PortChanges::from(input), deps).await
}

pub async fn patch_source_port(
    id: SourcePortId,
    patch: PortPatch,
    deps: &ServerDeps,
) -> RoutingResult<SourcePort> {
    ensure_non_empty(&patch)?;
    update(id, PortChanges::from(patch), deps).await
}

/// Returns how many flow edges went with the port.
pub async fn delete_source_port(id: SourcePortId, deps: &ServerDeps) -> RoutingResult<u64> {
    let mut tx = deps.begin().await?;
    let edges = graph::delete_source_port(tx.as_mut(), id).await?;
    tx.commit().await?;
    Ok(edges)
}

async fn update(
    id: SourcePortId,
    changes: PortChanges,
    deps: &ServerDeps,
) -> RoutingResult<SourcePort> {
    let mut tx = deps.begin().await?;
    let port = tx
        .update_source_port(id, &changes)
        .await?
        .ok_or_else(|| RoutingError::not_found(EntityKind::SourcePort, id))?;
    tx.commit().await?;

    info!(port_id = %id, "Updated source port");
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_source(deps: &ServerDeps) -> SourceId {
        let mut tx = deps.begin().await.unwrap();
        let event = tx.insert_event("Finals").await.unwrap();
        let source = tx.insert_source("Cam1", event.id).await.unwrap();
        tx.commit().await.unwrap();
        source.id
    }

    fn port_input(source_id: SourceId, description: Option<&str>) -> CreateSourcePortInput {
        CreateSourcePortInput {
            port_type: "video".into(),
            channel: 1,
            description: description.map(str::to_string),
            source_id,
        }
    }

    #[tokio::test]
    async fn test_listing_ports_of_missing_source_fails() {
        let deps = ServerDeps::in_memory();
        let err = list_source_ports_for_source(SourceId::new(), &deps)
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::OwnerNotFound { .. }));
    }

    #[tokio::test]
    async fn test_replace_clears_description_patch_keeps_it() {
        let deps = ServerDeps::in_memory();
        let source_id = seeded_source(&deps).await;
        let port = create_source_port(port_input(source_id, Some("SDI 1")), &deps)
            .await
            .unwrap();

        let patched = patch_source_port(
            port.id,
            PortPatch {
                channel: Some(3),
                ..Default::default()
            },
            &deps,
        )
        .await
        .unwrap();
        assert_eq!(patched.channel, 3);
        assert_eq!(patched.description.as_deref(), Some("SDI 1"));

        let replaced = replace_source_port(
            port.id,
            ReplacePortInput {
                port_type: "audio".into(),
                channel: 2,
                description: None,
            },
            &deps,
        )
        .await
        .unwrap();
        assert_eq!(replaced.port_type, "audio");
        assert_eq!(replaced.description, None);
        assert_eq!(replaced.source_id, source_id);
    }

    #[tokio::test]
    async fn test_empty_patch_is_rejected_before_lookup() {
        let deps = ServerDeps::in_memory();
        let err = patch_source_port(SourcePortId::new(), PortPatch::default(), &deps)
            .await
            .unwrap_err();
        assert!(matches!(err, RoutingError::PatchEmpty));
    }
}
