use crate::{Receipt, SectionDetails, User};
use rail_core::Occupant;

impl From<User> for rail_core::User {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

// The core user carries no seat; callers that know it use `Occupant`.
impl From<rail_core::User> for User {
    fn from(user: rail_core::User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            seat: String::new(),
        }
    }
}

impl From<Occupant> for User {
    fn from(occupant: Occupant) -> Self {
        Self {
            seat: occupant.seat,
            ..User::from(occupant.user)
        }
    }
}

impl From<rail_core::Receipt> for Receipt {
    fn from(receipt: rail_core::Receipt) -> Self {
        let user = User {
            seat: receipt.seat.clone(),
            ..User::from(receipt.user)
        };

        Self {
            from: receipt.from,
            to: receipt.to,
            user: Some(user),
            price_paid: receipt.price_paid,
            seat: receipt.seat,
        }
    }
}

impl From<Vec<Occupant>> for SectionDetails {
    fn from(occupants: Vec<Occupant>) -> Self {
        Self {
            users: occupants.into_iter().map(User::from).collect(),
        }
    }
}
