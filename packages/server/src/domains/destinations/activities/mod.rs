//! Destination activities (mirror the source ones)

mod mutations;
mod queries;

pub use mutations::*;
pub use queries::*;
