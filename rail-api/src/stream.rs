use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/seats/stream", get(seat_stream))
}

/// GET /v1/seats/stream
/// One `seat_changed` event per ledger mutation. Lagged subscribers skip ahead.
async fn seat_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.events.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(event) => Some(Event::default().event("seat_changed").json_data(&event)),
            Err(_) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
