use axum::{extract::Extension, http::StatusCode, routing::get, Json, Router};

use crate::common::PartylineId;
use crate::domains::partylines::{
    self,
    data::{CreatePartylineInput, ListPartylinesQuery, PartylinePatch, ReplacePartylineInput},
    Partyline,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{ApiPath, ApiQuery, ValidatedJson};

pub fn routes() -> Router {
    Router::new()
        .route("/partylines", get(list_partylines).post(create_partyline))
        .route(
            "/partylines/:id",
            get(get_partyline)
                .put(replace_partyline)
                .patch(patch_partyline)
                .delete(delete_partyline),
        )
}

pub async fn list_partylines(
    Extension(state): Extension<AppState>,
    ApiQuery(query): ApiQuery<ListPartylinesQuery>,
) -> Result<Json<Vec<Partyline>>, ApiError> {
    Ok(Json(partylines::list_partylines(query, &state.deps).await?))
}

pub async fn create_partyline(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreatePartylineInput>,
) -> Result<(StatusCode, Json<Partyline>), ApiError> {
    let partyline = partylines::create_partyline(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(partyline)))
}

pub async fn get_partyline(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<PartylineId>,
) -> Result<Json<Partyline>, ApiError> {
    Ok(Json(partylines::get_partyline(id, &state.deps).await?))
}

pub async fn replace_partyline(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<PartylineId>,
    ValidatedJson(input): ValidatedJson<ReplacePartylineInput>,
) -> Result<Json<Partyline>, ApiError> {
    Ok(Json(
        partylines::replace_partyline(id, input, &state.deps).await?,
    ))
}

pub async fn patch_partyline(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<PartylineId>,
    ValidatedJson(patch): ValidatedJson<PartylinePatch>,
) -> Result<Json<Partyline>, ApiError> {
    Ok(Json(partylines::patch_partyline(id, patch, &state.deps).await?))
}

pub async fn delete_partyline(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<PartylineId>,
) -> Result<StatusCode, ApiError> {
    partylines::delete_partyline(id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
