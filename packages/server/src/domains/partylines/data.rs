use serde::Deserialize;

use crate::common::{non_empty, EventId, FieldErrors, Validate};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartylineInput {
    pub title: String,
    pub event_id: EventId,
}

impl Validate for CreatePartylineInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        non_empty(&mut errors, "title", &self.title);
        errors.into_result()
    }
}

/// Partylines never move between events, so PUT only carries the title.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplacePartylineInput {
    pub title: String,
}

impl Validate for ReplacePartylineInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        non_empty(&mut errors, "title", &self.title);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartylinePatch {
    pub title: Option<String>,
}

crate::impl_patch_fields!(PartylinePatch { title });

impl Validate for PartylinePatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            non_empty(&mut errors, "title", title);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPartylinesQuery {
    pub event_id: Option<EventId>,
}
