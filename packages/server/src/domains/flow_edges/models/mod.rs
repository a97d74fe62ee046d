pub mod flow_edge;

pub use flow_edge::*;
