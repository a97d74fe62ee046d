use serde::Deserialize;

use crate::common::{non_empty, EventId, FieldErrors, Validate};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestinationInput {
    pub label: String,
    pub event_id: EventId,
}

impl Validate for CreateDestinationInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        non_empty(&mut errors, "label", &self.label);
        errors.into_result()
    }
}

/// PUT body; same shape as create.
pub type ReplaceDestinationInput = CreateDestinationInput;

/// Partial update. Also the change set the store applies for PUT.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationPatch {
    pub label: Option<String>,
    pub event_id: Option<EventId>,
}

crate::impl_patch_fields!(DestinationPatch { label, event_id });

impl Validate for DestinationPatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(label) = &self.label {
            non_empty(&mut errors, "label", label);
        }
        errors.into_result()
    }
}

impl From<ReplaceDestinationInput> for DestinationPatch {
    fn from(input: ReplaceDestinationInput) -> Self {
        Self {
            label: Some(input.label),
            event_id: Some(input.event_id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDestinationsQuery {
    pub event_id: Option<EventId>,
}
