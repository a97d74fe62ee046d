// Routing graph service - library core
//
// Tracks events, the sources and destinations patched into them, their
// ports, and the flow edges wiring source ports to destination ports.
// The graph rules live in domains::graph; storage sits behind kernel traits
// with Postgres and in-memory backends.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
