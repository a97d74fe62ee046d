// Common types and utilities shared across the application

pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod patch;
pub mod validation;

pub use entity_ids::*;
pub use errors::{EntityKind, RoutingError, RoutingResult};
pub use id::{Id, V7};
pub use patch::{ensure_non_empty, PatchFields};
pub use validation::{non_empty, positive, FieldErrors, Validate};
