use serde::Deserialize;

use crate::common::{non_empty, positive, DestinationId, FieldErrors, SourceId, Validate};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourcePortInput {
    #[serde(rename = "type")]
    pub port_type: String,
    pub channel: i32,
    pub description: Option<String>,
    pub source_id: SourceId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestinationPortInput {
    #[serde(rename = "type")]
    pub port_type: String,
    pub channel: i32,
    pub description: Option<String>,
    pub destination_id: DestinationId,
}

fn validate_port_shape(port_type: &str, channel: i32) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    non_empty(&mut errors, "type", port_type);
    positive(&mut errors, "channel", channel);
    errors.into_result()
}

impl Validate for CreateSourcePortInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        validate_port_shape(&self.port_type, self.channel)
    }
}

impl Validate for CreateDestinationPortInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        validate_port_shape(&self.port_type, self.channel)
    }
}

/// PUT body for either port kind. Ports never change owner.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplacePortInput {
    #[serde(rename = "type")]
    pub port_type: String,
    pub channel: i32,
    pub description: Option<String>,
}

impl Validate for ReplacePortInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        validate_port_shape(&self.port_type, self.channel)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortPatch {
    #[serde(rename = "type")]
    pub port_type: Option<String>,
    pub channel: Option<i32>,
    pub description: Option<String>,
}

crate::impl_patch_fields!(PortPatch {
    port_type,
    channel,
    description
});

impl Validate for PortPatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(port_type) = &self.port_type {
            non_empty(&mut errors, "type", port_type);
        }
        if let Some(channel) = self.channel {
            positive(&mut errors, "channel", channel);
        }
        errors.into_result()
    }
}

/// The change set a port update applies.
///
/// `description: Some(None)` clears the description; `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortChanges {
    pub port_type: Option<String>,
    pub channel: Option<i32>,
    pub description: Option<Option<String>>,
}

impl From<ReplacePortInput> for PortChanges {
    fn from(input: ReplacePortInput) -> Self {
        Self {
            port_type: Some(input.port_type),
            channel: Some(input.channel),
            description: Some(input.description),
        }
    }
}

impl From<PortPatch> for PortChanges {
    fn from(patch: PortPatch) -> Self {
        Self {
            port_type: patch.port_type,
            channel: patch.channel,
            description: patch.description.map(Some),
        }
    }
}
