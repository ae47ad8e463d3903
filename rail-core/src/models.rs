use serde::{Deserialize, Serialize};
use std::fmt;

/// Passenger identity. No field is validated or required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// A booking record. `seat` always equals the ledger key it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub from: String,
    pub to: String,
    pub user: User,
    pub price_paid: f32,
    pub seat: String,
}

/// A passenger together with the seat label they currently hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub seat: String,
    #[serde(flatten)]
    pub user: User,
}

/// Coarse split of the carriage, derived from a seat label's leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
}

impl Section {
    /// Labels whose first byte sorts before `'M'` are in section A, the rest in B.
    ///
    /// Only the first byte is compared, so "B1" and "A10" are not read as numbers.
    /// The empty label sorts before "M" and lands in A.
    pub fn of(seat: &str) -> Section {
        match seat.as_bytes().first() {
            Some(&lead) if lead >= b'M' => Section::B,
            _ => Section::A,
        }
    }

    /// Accepts exactly "A" or "B".
    pub fn parse(raw: &str) -> Option<Section> {
        match raw {
            "A" => Some(Section::A),
            "B" => Some(Section::B),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::A => "A",
            Section::B => "B",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
