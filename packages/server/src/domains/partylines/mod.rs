pub mod activities;
pub mod data;
pub mod models;

pub use activities::*;
pub use models::Partyline;
