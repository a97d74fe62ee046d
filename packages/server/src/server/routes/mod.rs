// HTTP routes
pub mod destination_ports;
pub mod destinations;
pub mod events;
pub mod flow_edges;
pub mod health;
pub mod partylines;
pub mod source_ports;
pub mod sources;

pub use health::*;
