use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use super::validation::FieldErrors;

/// The kinds of rows the routing graph is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Event,
    Source,
    Destination,
    SourcePort,
    DestinationPort,
    Partyline,
    FlowEdge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Event => "Event",
            Self::Source => "Source",
            Self::Destination => "Destination",
            Self::SourcePort => "Source port",
            Self::DestinationPort => "Destination port",
            Self::Partyline => "Partyline",
            Self::FlowEdge => "Flow edge",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by routing operations.
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// The entity addressed by the operation does not exist.
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: EntityKind, id: Uuid },

    /// A dependent create or move names a parent that does not exist.
    #[error("{entity} with ID {id} not found")]
    OwnerNotFound { entity: EntityKind, id: Uuid },

    #[error("Source port with ID {0} not found")]
    SourcePortNotFound(Uuid),

    #[error("Destination port with ID {0} not found")]
    DestinationPortNotFound(Uuid),

    #[error("At least one field must be provided for update")]
    PatchEmpty,

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl RoutingError {
    pub fn not_found(entity: EntityKind, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn owner_not_found(entity: EntityKind, id: impl Into<Uuid>) -> Self {
        Self::OwnerNotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<FieldErrors> for RoutingError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

pub type RoutingResult<T> = Result<T, RoutingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let id = Uuid::nil();
        let err = RoutingError::not_found(EntityKind::SourcePort, id);
        assert_eq!(
            err.to_string(),
            format!("Source port with ID {} not found", id)
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_owner_not_found_is_not_a_plain_not_found() {
        let err = RoutingError::owner_not_found(EntityKind::Event, Uuid::nil());
        assert!(!err.is_not_found());
    }
}
