use axum::{extract::Extension, http::StatusCode, routing::get, Json, Router};

use crate::common::DestinationId;
use crate::domains::destinations::{
    self,
    data::{CreateDestinationInput, ListDestinationsQuery, ReplaceDestinationInput, DestinationPatch},
    Destination,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{ApiPath, ApiQuery, ValidatedJson};

pub fn routes() -> Router {
    Router::new()
        .route("/destinations", get(list_destinations).post(create_destination))
        .route(
            "/destinations/:id",
            get(get_destination)
                .put(replace_destination)
                .patch(patch_destination)
                .delete(delete_destination),
        )
}

pub async fn list_destinations(
    Extension(state): Extension<AppState>,
    ApiQuery(query): ApiQuery<ListDestinationsQuery>,
) -> Result<Json<Vec<Destination>>, ApiError> {
    Ok(Json(destinations::list_destinations(query, &state.deps).await?))
}

pub async fn create_destination(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateDestinationInput>,
) -> Result<(StatusCode, Json<Destination>), ApiError> {
    let destination = destinations::create_destination(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(destination)))
}

pub async fn get_destination(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<DestinationId>,
) -> Result<Json<Destination>, ApiError> {
    Ok(Json(destinations::get_destination(id, &state.deps).await?))
}

pub async fn replace_destination(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<DestinationId>,
    ValidatedJson(input): ValidatedJson<ReplaceDestinationInput>,
) -> Result<Json<Destination>, ApiError> {
    Ok(Json(destinations::replace_destination(id, input, &state.deps).await?))
}

pub async fn patch_destination(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<DestinationId>,
    ValidatedJson(patch): ValidatedJson<DestinationPatch>,
) -> Result<Json<Destination>, ApiError> {
    Ok(Json(destinations::patch_destination(id, patch, &state.deps).await?))
}

/// Removes the destination's ports and every flow edge arriving at them.
pub async fn delete_destination(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<DestinationId>,
) -> Result<StatusCode, ApiError> {
    destinations::delete_destination(id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
