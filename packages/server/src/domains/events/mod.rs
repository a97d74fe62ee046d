pub mod activities;
pub mod data;
pub mod detail;
pub mod models;

pub use activities::*;
pub use detail::{EventDetail, EventSummary};
pub use models::Event;
