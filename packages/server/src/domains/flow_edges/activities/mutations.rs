use crate::common::{FlowEdgeId, RoutingResult};
use crate::domains::flow_edges::data::CreateFlowEdgeInput;
use crate::domains::flow_edges::models::FlowEdge;
use crate::domains::graph;
use crate::kernel::ServerDeps;

pub async fn create_flow_edge(
    input: CreateFlowEdgeInput,
    deps: &ServerDeps,
) -> RoutingResult<FlowEdge> {
    let mut tx = deps.begin().await?;
    let edge = graph::create_flow_edge(tx.as_mut(), &input).await?;
    tx.commit().await?;
    Ok(edge)
}

pub async fn delete_flow_edge(id: FlowEdgeId, deps: &ServerDeps) -> RoutingResult<()> {
    let mut tx = deps.begin().await?;
    graph::delete_flow_edge(tx.as_mut(), id).await?;
    tx.commit().await?;
    Ok(())
}
