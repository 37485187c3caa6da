//! Live standings over websocket (GET /ws/standings).
//!
//! The current table is sent as soon as the connection opens, then again on
//! every broadcast. Client frames other than Close are ignored.

use std::fmt::Display;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, StreamExt};

use leaguehub_core::league::{StandingsMessage, TableRow};

use crate::{broadcast::Revision, handlers::AppError, state::AppState};

pub async fn standings_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    // Anything published after this point replaces the table computed below.
    let as_of = state.broadcaster.revision();
    // Computed before the upgrade so a store failure is a plain HTTP error.
    let rows = state.table.compute().await?;
    Ok(ws.on_upgrade(move |socket| standings_session(socket, state, rows, as_of)))
}

#[derive(Debug, PartialEq, Eq)]
enum SendFailure {
    Closed(String),
    TimedOut,
}

/// Writes one frame, giving up after `timeout`.
async fn send_frame<S>(sink: &mut S, message: Message, timeout: Duration) -> Result<(), SendFailure>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    match tokio::time::timeout(timeout, sink.send(message)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(SendFailure::Closed(e.to_string())),
        Err(_) => Err(SendFailure::TimedOut),
    }
}

async fn standings_session(socket: WebSocket, state: AppState, rows: Vec<TableRow>, as_of: Revision) {
    let mut subscription = state
        .broadcaster
        .subscribe(StandingsMessage::new(rows), as_of);
    let mut shutdown_rx = state.subscribe_shutdown();
    let (mut ws_write, mut ws_read) = socket.split();
    let id = subscription.id();

    tracing::debug!(
        subscriber = id,
        subscribers = state.broadcaster.subscriber_count(),
        "Standings session opened"
    );

    loop {
        tokio::select! {
            next = subscription.recv() => {
                let Some(message) = next else {
                    tracing::debug!(subscriber = id, "Dropped by broadcaster");
                    break;
                };

                let json = match serde_json::to_string(message.as_ref()) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::warn!(subscriber = id, error = %e, "Failed to serialize standings");
                        continue;
                    }
                };

                match send_frame(&mut ws_write, Message::Text(json.into()), state.send_timeout).await {
                    Ok(()) => {}
                    Err(SendFailure::Closed(error)) => {
                        tracing::debug!(subscriber = id, %error, "Standings write failed");
                        break;
                    }
                    Err(SendFailure::TimedOut) => {
                        tracing::warn!(subscriber = id, "Standings write timed out");
                        break;
                    }
                }
            }
            incoming = ws_read.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(subscriber = id, error = %e, "Standings read error");
                    break;
                }
            },
            _ = shutdown_rx.recv() => {
                if let Err(e) = send_frame(&mut ws_write, Message::Close(None), state.send_timeout).await {
                    tracing::debug!(subscriber = id, error = ?e, "Close frame not delivered");
                }
                break;
            }
        }
    }

    tracing::debug!(subscriber = id, "Standings session closed");
}
