//! Flow edge activities

mod mutations;
mod queries;

pub use mutations::*;
pub use queries::*;
