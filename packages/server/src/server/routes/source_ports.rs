use axum::{
    extract::Extension,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::common::{SourceId, SourcePortId};
use crate::domains::ports::{
    self,
    data::{CreateSourcePortInput, PortPatch, ReplacePortInput},
    SourcePort,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{ApiPath, ValidatedJson};

pub fn routes() -> Router {
    Router::new()
        .route("/source-ports", post(create_source_port))
        .route(
            "/source-ports/:id",
            get(get_source_port)
                .put(replace_source_port)
                .patch(patch_source_port)
                .delete(delete_source_port),
        )
        .route(
            "/source-ports/by-source/:sourceId",
            get(list_source_ports_for_source),
        )
}

pub async fn create_source_port(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSourcePortInput>,
) -> Result<(StatusCode, Json<SourcePort>), ApiError> {
    let port = ports::create_source_port(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(port)))
}

pub async fn get_source_port(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<SourcePortId>,
) -> Result<Json<SourcePort>, ApiError> {
    Ok(Json(ports::get_source_port(id, &state.deps).await?))
}

pub async fn list_source_ports_for_source(
    Extension(state): Extension<AppState>,
    ApiPath(source_id): ApiPath<SourceId>,
) -> Result<Json<Vec<SourcePort>>, ApiError> {
    Ok(Json(
        ports::list_source_ports_for_source(source_id, &state.deps).await?,
    ))
}

pub async fn replace_source_port(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<SourcePortId>,
    ValidatedJson(input): ValidatedJson<ReplacePortInput>,
) -> Result<Json<SourcePort>, ApiError> {
    Ok(Json(ports::replace_source_port(id, input, &state.deps).await?))
}

pub async fn patch_source_port(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<SourcePortId>,
    ValidatedJson(patch): ValidatedJson<PortPatch>,
) -> Result<Json<SourcePort>, ApiError> {
    Ok(Json(ports::patch_source_port(id, patch, &state.deps).await?))
}

/// Flow edges leaving the port go with it.
pub async fn delete_source_port(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<SourcePortId>,
) -> Result<StatusCode, ApiError> {
    ports::delete_source_port(id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
