pub mod models;
pub mod pii;

pub use models::events::{SeatChange, SeatChangedEvent};
pub use pii::Masked;
