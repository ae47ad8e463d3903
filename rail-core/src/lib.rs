pub mod ledger;
pub mod models;

pub use ledger::{BookingLedger, SeatMap, FLAT_FARE};
pub use models::{Occupant, Receipt, Section, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("user with seat {0} not found")]
    NotFound(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
