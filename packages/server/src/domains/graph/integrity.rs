//! Read-only audit of the routing graph.

use anyhow::Result;

use crate::domains::flow_edges::models::FlowEdge;
use crate::kernel::RoutingTx;

/// Edges whose source or destination port no longer exists.
///
/// Empty whenever every write went through this module.
pub async fn find_dangling_flow_edges(tx: &mut dyn RoutingTx) -> Result<Vec<FlowEdge>> {
    let mut dangling = Vec::new();
    for edge in tx.list_flow_edges().await? {
        let source_missing = tx.find_source_port(edge.source_port_id).await?.is_none();
        let destination_missing = tx
            .find_destination_port(edge.destination_port_id)
            .await?
            .is_none();
        if source_missing || destination_missing {
            dangling.push(edge);
        }
    }
    Ok(dangling)
}
