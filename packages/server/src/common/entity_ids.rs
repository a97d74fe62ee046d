//! Typed ID definitions for every routing entity.

pub use super::id::{Id, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Event entities (a broadcast production).
pub struct EventEntity;

/// Marker type for Source entities (input feeds).
pub struct SourceEntity;

/// Marker type for Destination entities (output feeds).
pub struct DestinationEntity;

/// Marker type for SourcePort entities.
pub struct SourcePortEntity;

/// Marker type for DestinationPort entities.
pub struct DestinationPortEntity;

/// Marker type for Partyline entities.
pub struct PartylineEntity;

/// Marker type for FlowEdge entities.
pub struct FlowEdgeEntity;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type EventId = Id<EventEntity>;
pub type SourceId = Id<SourceEntity>;
pub type DestinationId = Id<DestinationEntity>;
pub type SourcePortId = Id<SourcePortEntity>;
pub type DestinationPortId = Id<DestinationPortEntity>;
pub type PartylineId = Id<PartylineEntity>;
pub type FlowEdgeId = Id<FlowEdgeEntity>;
