use crate::models::{Occupant, Receipt, Section, User};
use crate::{LedgerError, LedgerResult};
use rail_shared::Masked;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Every ticket costs the same.
pub const FLAT_FARE: f32 = 20.0;

/// Seat label → receipt. Single-threaded; [`BookingLedger`] adds the locking.
#[derive(Debug, Default)]
pub struct SeatMap {
    seats: HashMap<String, Receipt>,
}

impl SeatMap {
    pub fn new() -> Self {
        Self {
            seats: HashMap::new(),
        }
    }

    /// Zero-padded ordinal of the next occupant. Derived from the count, so it
    /// does not skip labels freed by removal or taken by reassignment.
    pub fn next_label(&self) -> String {
        format!("{:02}", self.seats.len() + 1)
    }

    /// Book a seat at the flat fare. Also returns whichever booking the new
    /// label overwrote, if any.
    pub fn purchase(
        &mut self,
        from: String,
        to: String,
        user: User,
    ) -> (Receipt, Option<Receipt>) {
        let seat = self.next_label();
        let receipt = Receipt {
            from,
            to,
            user,
            price_paid: FLAT_FARE,
            seat: seat.clone(),
        };

        let displaced = self.seats.insert(seat, receipt.clone());
        (receipt, displaced)
    }

    pub fn receipt(&self, seat: &str) -> LedgerResult<&Receipt> {
        self.seats
            .get(seat)
            .ok_or_else(|| LedgerError::NotFound(seat.to_string()))
    }

    /// Everyone seated in `section`, in no particular order.
    pub fn section(&self, section: Section) -> Vec<Occupant> {
        self.seats
            .iter()
            .filter(|(seat, _)| Section::of(seat) == section)
            .map(|(seat, receipt)| Occupant {
                seat: seat.clone(),
                user: receipt.user.clone(),
            })
            .collect()
    }

    /// Move the booking at `seat` to `new_seat`. Whoever held `new_seat` is
    /// dropped and handed back as the second element.
    pub fn reassign(
        &mut self,
        seat: &str,
        new_seat: &str,
    ) -> LedgerResult<(Receipt, Option<Receipt>)> {
        let mut receipt = self
            .seats
            .remove(seat)
            .ok_or_else(|| LedgerError::NotFound(seat.to_string()))?;

        receipt.seat = new_seat.to_string();

        let displaced = self.seats.insert(new_seat.to_string(), receipt.clone());
        Ok((receipt, displaced))
    }

    pub fn remove(&mut self, seat: &str) -> LedgerResult<Receipt> {
        self.seats
            .remove(seat)
            .ok_or_else(|| LedgerError::NotFound(seat.to_string()))
    }

    pub fn contains(&self, seat: &str) -> bool {
        self.seats.contains_key(seat)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn receipts(&self) -> impl Iterator<Item = &Receipt> {
        self.seats.values()
    }
}

/// Process-wide booking state shared by every request handler.
///
/// Each operation holds one exclusive lock for its whole duration, reads
/// included. Nothing awaits or does I/O under the lock.
#[derive(Debug, Default)]
pub struct BookingLedger {
    seats: Mutex<SeatMap>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            seats: Mutex::new(SeatMap::new()),
        }
    }

    // Mutations are plain HashMap calls with no panicking paths in between,
    // so a poisoned guard still protects a consistent map.
    fn lock(&self) -> MutexGuard<'_, SeatMap> {
        self.seats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn purchase_ticket(
        &self,
        from: impl Into<String>,
        to: impl Into<String>,
        user: User,
    ) -> Receipt {
        let (receipt, displaced) = self.lock().purchase(from.into(), to.into(), user);
        log_displaced(&receipt.seat, displaced, "Purchase overwrote an existing booking");
        info!(
            seat = %receipt.seat,
            from = %receipt.from,
            to = %receipt.to,
            email = ?Masked(&receipt.user.email),
            "Ticket purchased"
        );
        receipt
    }

    pub fn receipt_details(&self, seat: &str) -> LedgerResult<Receipt> {
        let receipt = self.lock().receipt(seat).cloned();
        if receipt.is_err() {
            debug!(seat = %seat, "Receipt lookup missed");
        }
        receipt
    }

    pub fn section_details(&self, section: Section) -> Vec<Occupant> {
        let occupants = self.lock().section(section);
        debug!(section = %section, count = occupants.len(), "Section listed");
        occupants
    }

    pub fn modify_user_seat(&self, seat: &str, new_seat: &str) -> LedgerResult<Receipt> {
        let (receipt, displaced) = self.lock().reassign(seat, new_seat)?;
        log_displaced(new_seat, displaced, "Seat reassignment overwrote an existing booking");
        info!(from_seat = %seat, to_seat = %new_seat, "Seat reassigned");
        Ok(receipt)
    }

    /// Always `Ok(true)` when the seat was booked; a missing seat is an error.
    pub fn remove_user(&self, seat: &str) -> LedgerResult<bool> {
        self.lock().remove(seat)?;
        info!(seat = %seat, "Booking removed");
        Ok(true)
    }

    pub fn occupancy(&self) -> usize {
        self.lock().len()
    }

    pub fn snapshot(&self) -> Vec<Receipt> {
        self.lock().receipts().cloned().collect()
    }
}

// Called only after the guard is dropped.
fn log_displaced(seat: &str, displaced: Option<Receipt>, message: &str) {
    if let Some(displaced) = displaced {
        warn!(
            seat = %seat,
            displaced_email = ?Masked(&displaced.user.email),
            "{}",
            message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use tracing_subscriber::fmt::MakeWriter;

    /// Log writer that records whether the ledger lock was held during any write.
    #[derive(Clone)]
    struct LockWatcher {
        ledger: Arc<BookingLedger>,
        held_during_write: Arc<AtomicBool>,
        writes: Arc<AtomicBool>,
    }

    impl io::Write for LockWatcher {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes.store(true, Ordering::SeqCst);
            if self.ledger.seats.try_lock().is_err() {
                self.held_during_write.store(true, Ordering::SeqCst);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LockWatcher {
        type Writer = LockWatcher;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn john() -> User {
        User {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
        }
    }

    fn jane() -> User {
        User {
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
            email: "jane.roe@example.com".to_string(),
        }
    }

    #[test]
    fn test_purchase_assigns_fresh_seat() {
        let mut map = SeatMap::new();

        let first_label = map.next_label();
        assert!(!map.contains(&first_label));
        let (first, displaced) = map.purchase("London".to_string(), "France".to_string(), john());
        assert!(displaced.is_none());
        assert_eq!(first.seat, "01");
        assert_eq!(map.receipt("01").unwrap(), &first);

        let (second, _) = map.purchase("London".to_string(), "France".to_string(), jane());
        assert_eq!(second.seat, "02");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_purchase_fare_is_flat() {
        let ledger = BookingLedger::new();

        let a = ledger.purchase_ticket("London", "France", john());
        let b = ledger.purchase_ticket("", "", User::default());
        let c = ledger.purchase_ticket("Paris", "Berlin", jane());

        for receipt in [a, b, c] {
            assert_eq!(receipt.price_paid, 20.0);
        }
    }

    #[test]
    fn test_lookup_after_purchase() {
        let ledger = BookingLedger::new();

        let purchased = ledger.purchase_ticket("London", "France", john());
        let found = ledger.receipt_details(&purchased.seat).unwrap();

        assert_eq!(found, purchased);
        assert_eq!(found.from, "London");
        assert_eq!(found.to, "France");
        assert_eq!(found.user, john());
    }

    #[test]
    fn test_not_found_on_empty_ledger() {
        let ledger = BookingLedger::new();
        let missing = LedgerError::NotFound("X".to_string());

        assert_eq!(ledger.receipt_details("X"), Err(missing.clone()));
        assert_eq!(ledger.modify_user_seat("X", "05"), Err(missing.clone()));
        assert_eq!(ledger.remove_user("X"), Err(missing));
        assert_eq!(ledger.occupancy(), 0);
    }

    #[test]
    fn test_not_found_message_names_seat() {
        let ledger = BookingLedger::new();

        let err = ledger.receipt_details("NonExistentSeat").unwrap_err();
        assert_eq!(err.to_string(), "user with seat NonExistentSeat not found");
    }

    #[test]
    fn test_section_listing() {
        let mut map = SeatMap::new();
        map.purchase("London".to_string(), "France".to_string(), john());
        map.purchase("London".to_string(), "France".to_string(), jane());
        map.reassign("02", "Z1").unwrap();

        let section_a = map.section(Section::A);
        assert_eq!(section_a.len(), 1);
        assert_eq!(section_a[0].seat, "01");
        assert_eq!(section_a[0].user, john());

        let section_b = map.section(Section::B);
        assert_eq!(section_b.len(), 1);
        assert_eq!(section_b[0].seat, "Z1");
        assert_eq!(section_b[0].user, jane());
    }

    #[test]
    fn test_section_listing_empty() {
        let ledger = BookingLedger::new();
        assert!(ledger.section_details(Section::A).is_empty());
        assert!(ledger.section_details(Section::B).is_empty());
    }

    #[test]
    fn test_modify_moves_never_duplicates() {
        let ledger = BookingLedger::new();
        let original = ledger.purchase_ticket("London", "France", john());
        assert_eq!(original.seat, "01");

        let moved = ledger.modify_user_seat("01", "05").unwrap();

        assert_eq!(moved.seat, "05");
        assert_eq!(moved.from, original.from);
        assert_eq!(moved.to, original.to);
        assert_eq!(moved.user, original.user);
        assert_eq!(moved.price_paid, original.price_paid);
        assert!(ledger.receipt_details("01").is_err());
        assert_eq!(ledger.receipt_details("05").unwrap(), moved);
        assert_eq!(ledger.occupancy(), 1);
    }

    #[test]
    fn test_modify_to_same_seat_keeps_booking() {
        let ledger = BookingLedger::new();
        let original = ledger.purchase_ticket("London", "France", john());

        let moved = ledger.modify_user_seat("01", "01").unwrap();

        assert_eq!(moved, original);
        assert_eq!(ledger.receipt_details("01").unwrap(), original);
    }

    #[test]
    fn test_modify_overwrites_occupied_destination() {
        let ledger = BookingLedger::new();
        ledger.purchase_ticket("London", "France", john());
        ledger.purchase_ticket("London", "France", jane());

        let moved = ledger.modify_user_seat("01", "02").unwrap();

        assert_eq!(moved.user, john());
        assert_eq!(ledger.occupancy(), 1);
        assert_eq!(ledger.receipt_details("02").unwrap().user, john());
    }

    #[test]
    fn test_remove_deletes_exactly_one() {
        let ledger = BookingLedger::new();
        ledger.purchase_ticket("London", "France", john());
        ledger.purchase_ticket("London", "France", jane());

        assert_eq!(ledger.remove_user("01"), Ok(true));

        let seats: Vec<String> = ledger.snapshot().into_iter().map(|r| r.seat).collect();
        assert_eq!(seats, vec!["02".to_string()]);
    }

    #[test]
    fn test_count_based_label_can_collide_after_removal() {
        // Known limitation: the next label comes from the occupant count.
        let ledger = BookingLedger::new();
        ledger.purchase_ticket("London", "France", john());
        ledger.purchase_ticket("London", "France", jane());
        ledger.remove_user("01").unwrap();

        let third = ledger.purchase_ticket("Paris", "Berlin", User::default());

        assert_eq!(third.seat, "02");
        assert_eq!(ledger.occupancy(), 1);
        assert_eq!(ledger.receipt_details("02").unwrap(), third);
    }

    #[test]
    fn test_keys_match_receipt_seats() {
        let ledger = BookingLedger::new();
        for _ in 0..5 {
            ledger.purchase_ticket("London", "France", john());
        }
        ledger.modify_user_seat("03", "M7").unwrap();
        ledger.remove_user("04").unwrap();

        let map = ledger.lock();
        assert_eq!(map.len(), 4);
        for (label, receipt) in &map.seats {
            assert_eq!(&receipt.seat, label);
        }
    }

    #[test]
    fn test_overwrite_warnings_logged_outside_lock() {
        let ledger = Arc::new(BookingLedger::new());
        let watcher = LockWatcher {
            ledger: Arc::clone(&ledger),
            held_during_write: Arc::new(AtomicBool::new(false)),
            writes: Arc::new(AtomicBool::new(false)),
        };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(watcher.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            ledger.purchase_ticket("London", "France", john());
            ledger.purchase_ticket("London", "France", jane());
            // Displaces jane from "02".
            ledger.modify_user_seat("01", "02").unwrap();
            // Count-based label "02" displaces john.
            ledger.purchase_ticket("Paris", "Berlin", User::default());
            ledger.section_details(Section::A);
            let _ = ledger.receipt_details("X");
            ledger.remove_user("02").unwrap();
        });

        assert!(watcher.writes.load(Ordering::SeqCst));
        assert!(!watcher.held_during_write.load(Ordering::SeqCst));
    }

    #[test]
    fn test_reassign_returns_displaced_booking() {
        let mut map = SeatMap::new();
        map.purchase("London".to_string(), "France".to_string(), john());
        map.purchase("London".to_string(), "France".to_string(), jane());

        let (moved, displaced) = map.reassign("01", "02").unwrap();

        assert_eq!(moved.user, john());
        assert_eq!(displaced.unwrap().user, jane());
        assert_eq!(map.len(), 1);

        let (third, displaced) =
            map.purchase("Paris".to_string(), "Berlin".to_string(), User::default());
        assert_eq!(third.seat, "02");
        assert_eq!(displaced.unwrap().user, john());
    }

    #[test]
    fn test_concurrent_purchases_get_distinct_seats() {
        let ledger = Arc::new(BookingLedger::new());
        let handles: Vec<_> = (0..64)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    let user = User {
                        first_name: format!("Passenger{i}"),
                        ..User::default()
                    };
                    ledger.purchase_ticket("London", "France", user).seat
                })
            })
            .collect();

        let seats: HashSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(seats.len(), 64);
        assert_eq!(ledger.occupancy(), 64);
        for seat in &seats {
            assert!(ledger.receipt_details(seat).is_ok());
        }
    }
}
