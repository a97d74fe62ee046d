//! Port activities. Creation and deletion go through `domains::graph`, which
//! owns the owner checks and the flow-edge cascade.

mod destination_ports;
mod source_ports;

pub use destination_ports::*;
pub use source_ports::*;
