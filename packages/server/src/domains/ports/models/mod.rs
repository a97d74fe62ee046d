pub mod destination_port;
pub mod source_port;

pub use destination_port::*;
pub use source_port::*;
