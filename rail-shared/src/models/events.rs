use serde::{Deserialize, Serialize};

/// What happened to a seat.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatChange {
    Assigned,
    Reassigned,
    Released,
}

/// Published after every successful ledger mutation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SeatChangedEvent {
    pub change: SeatChange,
    pub seat: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub previous_seat: Option<String>,
    pub occurred_at: i64,
}

impl SeatChangedEvent {
    pub fn assigned(seat: impl Into<String>) -> Self {
        Self::now(SeatChange::Assigned, seat.into(), None)
    }

    pub fn reassigned(previous_seat: impl Into<String>, seat: impl Into<String>) -> Self {
        Self::now(SeatChange::Reassigned, seat.into(), Some(previous_seat.into()))
    }

    pub fn released(seat: impl Into<String>) -> Self {
        Self::now(SeatChange::Released, seat.into(), None)
    }

    fn now(change: SeatChange, seat: String, previous_seat: Option<String>) -> Self {
        Self {
            change,
            seat,
            previous_seat,
            occurred_at: chrono::Utc::now().timestamp(),
        }
    }
}
