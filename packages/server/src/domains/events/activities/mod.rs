//! Event activities - the operations the HTTP layer calls.
//!
//! Each activity opens one unit of work through `ServerDeps`, does its reads
//! and writes inside it and commits before returning.

mod mutations;
mod queries;

pub use mutations::*;
pub use queries::*;
