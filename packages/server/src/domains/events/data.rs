use serde::Deserialize;

use crate::common::{non_empty, DestinationId, FieldErrors, PartylineId, SourceId, Validate};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventInput {
    pub title: String,
}

impl Validate for CreateEventInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        non_empty(&mut errors, "title", &self.title);
        errors.into_result()
    }
}

/// Full replacement of an event.
///
/// Each child list, when present, is the complete desired set for that
/// event: listed ids are kept and relabelled, entries without an id are
/// created, and children left out are deleted with their ports and edges.
/// An absent list leaves that child set alone.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceEventInput {
    pub title: String,
    pub sources: Option<Vec<EventSourceInput>>,
    pub destinations: Option<Vec<EventDestinationInput>>,
    pub partylines: Option<Vec<EventPartylineInput>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventSourceInput {
    pub id: Option<SourceId>,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDestinationInput {
    pub id: Option<DestinationId>,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventPartylineInput {
    pub id: Option<PartylineId>,
    pub title: String,
}

impl Validate for ReplaceEventInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        non_empty(&mut errors, "title", &self.title);
        for (i, source) in self.sources.iter().flatten().enumerate() {
            non_empty(&mut errors, &format!("sources.{}.label", i), &source.label);
        }
        for (i, destination) in self.destinations.iter().flatten().enumerate() {
            non_empty(
                &mut errors,
                &format!("destinations.{}.label", i),
                &destination.label,
            );
        }
        for (i, partyline) in self.partylines.iter().flatten().enumerate() {
            non_empty(&mut errors, &format!("partylines.{}.title", i), &partyline.title);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
}

crate::impl_patch_fields!(EventPatch { title });

impl Validate for EventPatch {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            non_empty(&mut errors, "title", title);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventsQuery {
    /// `true` returns full event details instead of summaries.
    #[serde(default)]
    pub detail: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PatchFields;

    #[test]
    fn test_replace_reports_nested_fields() {
        let input: ReplaceEventInput = serde_json::from_value(serde_json::json!({
            "title": "Finals",
            "sources": [{ "label": "Cam1" }, { "label": "" }],
            "partylines": [{ "title": "" }]
        }))
        .unwrap();

        let errors = input.validate().unwrap_err();
        assert!(errors.get("sources.1.label").is_some());
        assert!(errors.get("partylines.0.title").is_some());
        assert!(errors.get("sources.0.label").is_none());
    }

    #[test]
    fn test_patch_ignores_unknown_keys() {
        let patch: EventPatch = serde_json::from_value(serde_json::json!({ "colour": "red" })).unwrap();
        assert!(patch.is_empty());
    }
}
