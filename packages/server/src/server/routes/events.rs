use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::common::EventId;
use crate::domains::events::{
    self,
    data::{CreateEventInput, EventPatch, ListEventsQuery, ReplaceEventInput},
    Event, EventDetail,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{ApiPath, ApiQuery, ValidatedJson};

pub fn routes() -> Router {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/:id",
            get(get_event)
                .put(replace_event)
                .patch(patch_event)
                .delete(delete_event),
        )
}

/// Summaries by default, full details with `?detail=true`.
pub async fn list_events(
    Extension(state): Extension<AppState>,
    ApiQuery(query): ApiQuery<ListEventsQuery>,
) -> Result<Response, ApiError> {
    if query.detail {
        let details = events::list_event_details(&state.deps).await?;
        Ok(Json(details).into_response())
    } else {
        let summaries = events::list_event_summaries(&state.deps).await?;
        Ok(Json(summaries).into_response())
    }
}

pub async fn create_event(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateEventInput>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let event = events::create_event(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn get_event(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<EventId>,
) -> Result<Json<EventDetail>, ApiError> {
    Ok(Json(events::get_event_detail(id, &state.deps).await?))
}

pub async fn replace_event(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<EventId>,
    ValidatedJson(input): ValidatedJson<ReplaceEventInput>,
) -> Result<Json<EventDetail>, ApiError> {
    Ok(Json(events::replace_event(id, input, &state.deps).await?))
}

pub async fn patch_event(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<EventId>,
    ValidatedJson(patch): ValidatedJson<EventPatch>,
) -> Result<Json<EventDetail>, ApiError> {
    Ok(Json(events::patch_event(id, patch, &state.deps).await?))
}

pub async fn delete_event(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<EventId>,
) -> Result<StatusCode, ApiError> {
    events::delete_event(id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
