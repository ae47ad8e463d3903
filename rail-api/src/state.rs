use rail_core::BookingLedger;
use rail_shared::SeatChangedEvent;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<BookingLedger>,
    pub events: broadcast::Sender<SeatChangedEvent>,
}

impl AppState {
    pub fn new(ledger: Arc<BookingLedger>, channel_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(channel_capacity.max(1));
        Self { ledger, events }
    }

    /// Fire-and-forget; having no subscribers is not an error.
    pub fn publish(&self, event: SeatChangedEvent) {
        let _ = self.events.send(event);
    }
}
