//! Partylines are leaves: nothing references them, so deletes never cascade.

use tracing::info;

use crate::common::{ensure_non_empty, EntityKind, PartylineId, RoutingError, RoutingResult};
use crate::domains::partylines::data::{
    CreatePartylineInput, PartylinePatch, ReplacePartylineInput,
};
use crate::domains::partylines::models::Partyline;
use crate::kernel::ServerDeps;

pub async fn create_partyline(
    input: CreatePartylineInput,
    deps: &ServerDeps,
) -> RoutingResult<Partyline> {
    let mut tx = deps.begin().await?;
    if tx.find_event(input.event_id).await?.is_none() {
        return Err(RoutingError::owner_not_found(
            EntityKind::Event,
            input.event_id,
        ));
    }
    let partyline = tx.insert_partyline(&input.title, input.event_id).await?;
    tx.commit().await?;

    info!(partyline_id = %partyline.id, event_id = %partyline.event_id, "Created partyline");
    Ok(partyline)
}

pub async fn replace_partyline(
    id: PartylineId,
    input: ReplacePartylineInput,
    deps: &ServerDeps,
) -> RoutingResult<Partyline> {
    let patch = PartylinePatch {
        title: Some(input.title),
    };
    update(id, &patch, deps).await
}

pub async fn patch_partyline(
    id: PartylineId,
    patch: PartylinePatch,
    deps: &ServerDeps,
) -> RoutingResult<Partyline> {
    ensure_non_empty(&patch)?;
    update(id, &patch, deps).await
}

pub async fn delete_partyline(id: PartylineId, deps: &ServerDeps) -> RoutingResult<()> {
    let mut tx = deps.begin().await?;
    if !tx.delete_partyline(id).await? {
        return Err(RoutingError::not_found(EntityKind::Partyline, id));
    }
    tx.commit().await?;

    info!(partyline_id = %id, "Deleted partyline");
    Ok(())
}

async fn update(
    id: PartylineId,
    patch: &PartylinePatch,
    deps: &ServerDeps,
) -> RoutingResult<Partyline> {
    let mut tx = deps.begin().await?;
    let partyline = tx
        .update_partyline(id, patch)
        .await?
        .ok_or_else(|| RoutingError::not_found(EntityKind::Partyline, id))?;
    tx.commit().await?;

    info!(partyline_id = %id, "Updated partyline");
    Ok(partyline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_retitle_and_delete() {
        let deps = ServerDeps::in_memory();
        let mut tx = deps.begin().await.unwrap();
        let event = tx.insert_event("Finals").await.unwrap();
        tx.commit().await.unwrap();

        let partyline = create_partyline(
            CreatePartylineInput {
                title: "Director".into(),
                event_id: event.id,
            },
            &deps,
        )
        .await
        .unwrap();

        let renamed = replace_partyline(
            partyline.id,
            ReplacePartylineInput {
                title: "Producer".into(),
            },
            &deps,
        )
        .await
        .unwrap();
        assert_eq!(renamed.title, "Producer");
        assert_eq!(renamed.event_id, event.id);

        delete_partyline(partyline.id, &deps).await.unwrap();
        let err = delete_partyline(partyline.id, &deps).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_patch_missing_partyline_is_not_found() {
        let deps = ServerDeps::in_memory();
        let patch = PartylinePatch {
            title: Some("Comms".into()),
        };
        let err = patch_partyline(PartylineId::new(), patch, &deps)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
