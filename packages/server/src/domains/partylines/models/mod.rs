pub mod partyline;

pub use partyline::*;
