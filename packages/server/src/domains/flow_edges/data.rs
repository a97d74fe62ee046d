use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{DestinationPortId, EventId, FieldErrors, FlowEdgeId, SourcePortId, Validate};
use crate::domains::ports::models::{DestinationPort, SourcePort};

use super::models::FlowEdge;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlowEdgeInput {
    pub source_port_id: SourcePortId,
    pub destination_port_id: DestinationPortId,
}

impl Validate for CreateFlowEdgeInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        // Both fields are typed ids; serde has already checked them.
        Ok(())
    }
}

/// A flow edge with both endpoints expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdgeDetail {
    pub id: FlowEdgeId,
    pub source_port: SourcePort,
    pub destination_port: DestinationPort,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FlowEdgeDetail {
    pub fn new(edge: FlowEdge, source_port: SourcePort, destination_port: DestinationPort) -> Self {
        Self {
            id: edge.id,
            source_port,
            destination_port,
            created_at: edge.created_at,
            updated_at: edge.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFlowEdgesQuery {
    /// Only edges whose source port traces back to this event.
    pub event_id: Option<EventId>,
    pub expand: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetFlowEdgeQuery {
    pub expand: Option<String>,
}

/// `expand=ports` asks for [`FlowEdgeDetail`] instead of the flat edge.
pub fn wants_ports(expand: Option<&str>) -> bool {
    expand
        .map(|value| value.split(',').any(|part| part.trim() == "ports"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_ports() {
        assert!(wants_ports(Some("ports")));
        assert!(wants_ports(Some("owners, ports")));
        assert!(!wants_ports(Some("owners")));
        assert!(!wants_ports(None));
    }
}
