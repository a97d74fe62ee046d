use axum::{extract::Extension, http::StatusCode, routing::get, Json, Router};

use crate::common::SourceId;
use crate::domains::sources::{
    self,
    data::{CreateSourceInput, ListSourcesQuery, ReplaceSourceInput, SourcePatch},
    Source,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{ApiPath, ApiQuery, ValidatedJson};

pub fn routes() -> Router {
    Router::new()
        .route("/sources", get(list_sources).post(create_source))
        .route(
            "/sources/:id",
            get(get_source)
                .put(replace_source)
                .patch(patch_source)
                .delete(delete_source),
        )
}

pub async fn list_sources(
    Extension(state): Extension<AppState>,
    ApiQuery(query): ApiQuery<ListSourcesQuery>,
) -> Result<Json<Vec<Source>>, ApiError> {
    Ok(Json(sources::list_sources(query, &state.deps).await?))
}

pub async fn create_source(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSourceInput>,
) -> Result<(StatusCode, Json<Source>), ApiError> {
    let source = sources::create_source(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(source)))
}

pub async fn get_source(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<SourceId>,
) -> Result<Json<Source>, ApiError> {
    Ok(Json(sources::get_source(id, &state.deps).await?))
}

pub async fn replace_source(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<SourceId>,
    ValidatedJson(input): ValidatedJson<ReplaceSourceInput>,
) -> Result<Json<Source>, ApiError> {
    Ok(Json(sources::replace_source(id, input, &state.deps).await?))
}

pub async fn patch_source(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<SourceId>,
    ValidatedJson(patch): ValidatedJson<SourcePatch>,
) -> Result<Json<Source>, ApiError> {
    Ok(Json(sources::patch_source(id, patch, &state.deps).await?))
}

/// Removes the source's ports and every flow edge leaving them.
pub async fn delete_source(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<SourceId>,
) -> Result<StatusCode, ApiError> {
    sources::delete_source(id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
