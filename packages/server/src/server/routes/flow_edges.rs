use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::common::FlowEdgeId;
use crate::domains::flow_edges::{
    self,
    data::{wants_ports, CreateFlowEdgeInput, GetFlowEdgeQuery, ListFlowEdgesQuery},
    FlowEdge,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::server::extract::{ApiPath, ApiQuery, ValidatedJson};

pub fn routes() -> Router {
    Router::new()
        .route("/flow-edges", get(list_flow_edges).post(create_flow_edge))
        .route(
            "/flow-edges/:id",
            get(get_flow_edge).delete(delete_flow_edge),
        )
}

/// `?eventId=` narrows to one event, `?expand=ports` embeds both ports.
pub async fn list_flow_edges(
    Extension(state): Extension<AppState>,
    ApiQuery(query): ApiQuery<ListFlowEdgesQuery>,
) -> Result<Response, ApiError> {
    if wants_ports(query.expand.as_deref()) {
        let details = flow_edges::list_flow_edge_details(query.event_id, &state.deps).await?;
        Ok(Json(details).into_response())
    } else {
        let edges = flow_edges::list_flow_edges(query.event_id, &state.deps).await?;
        Ok(Json(edges).into_response())
    }
}

pub async fn create_flow_edge(
    Extension(state): Extension<AppState>,
    ValidatedJson(input): ValidatedJson<CreateFlowEdgeInput>,
) -> Result<(StatusCode, Json<FlowEdge>), ApiError> {
    let edge = flow_edges::create_flow_edge(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(edge)))
}

pub async fn get_flow_edge(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<FlowEdgeId>,
    ApiQuery(query): ApiQuery<GetFlowEdgeQuery>,
) -> Result<Response, ApiError> {
    if wants_ports(query.expand.as_deref()) {
        let detail = flow_edges::get_flow_edge_detail(id, &state.deps).await?;
        Ok(Json(detail).into_response())
    } else {
        let edge = flow_edges::get_flow_edge(id, &state.deps).await?;
        Ok(Json(edge).into_response())
    }
}

pub async fn delete_flow_edge(
    Extension(state): Extension<AppState>,
    ApiPath(id): ApiPath<FlowEdgeId>,
) -> Result<StatusCode, ApiError> {
    flow_edges::delete_flow_edge(id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
