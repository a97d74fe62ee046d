// Routing graph domains
pub mod destinations;
pub mod events;
pub mod flow_edges;
pub mod graph;
pub mod partylines;
pub mod ports;
pub mod sources;
