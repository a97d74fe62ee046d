use axum::{
    extract::Extension,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::common::{DestinationId, DestinationPortId};
use crate::domains::ports::{
    self,
    data::{CreateDestinationPortInput, PortPatch, ReplacePortInput},
    DestinationPort,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{ApiPath, ValidatedJson};

pub fn routes() -> Router {
    Router::new()
        .route("/destination-ports", post(create_destination_port))
        .route(
            "/destination-ports/:id",
            get(get_destination_port)
                .put(replace_destination_port)
                .patch(patch_destination_port)
                .delete(delete_destination_port),
        )
        .route(
            "/destination-ports/by-destination/:destinationId",
            get(list_destination_ports_for_destination),
        )
}

pub async fn create_destination_port(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateDestinationPortInput>,
) -> Result<(StatusCode, Json<DestinationPort>), ApiError> {
    let port = ports::create_destination_port(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(port)))
}

pub async fn get_destination_port(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<DestinationPortId>,
) -> Result<Json<DestinationPort>, ApiError> {
    Ok(Json(ports::get_destination_port(id, &state.deps).await?))
}

pub async fn list_destination_ports_for_destination(
    Extension(state): Extension<AppState>,
    ApiPath(destination_id): ApiPath<DestinationId>,
) -> Result<Json<Vec<DestinationPort>>, ApiError> {
    Ok(Json(
        ports::list_destination_ports_for_destination(destination_id, &state.deps).await?,
    ))
}

pub async fn replace_destination_port(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<DestinationPortId>,
    ValidatedJson(input): ValidatedJson<ReplacePortInput>,
) -> Result<Json<DestinationPort>, ApiError> {
    Ok(Json(ports::replace_destination_port(id, input, &state.deps).await?))
}

pub async fn patch_destination_port(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<DestinationPortId>,
    ValidatedJson(patch): ValidatedJson<PortPatch>,
) -> Result<Json<DestinationPort>, ApiError> {
    Ok(Json(ports::patch_destination_port(id, patch, &state.deps).await?))
}

/// Flow edges arriving at the port go with it.
pub async fn delete_destination_port(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<DestinationPortId>,
) -> Result<StatusCode, ApiError> {
    ports::delete_destination_port(id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
