//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{domain::ChannelId, ui::state::AppState, usecase::ConnectionSession};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let channel_id = match ChannelId::try_from(channel_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting WebSocket upgrade: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, channel_id)))
}

/// Spawns the writer task that drains the connection's outbound buffer into the socket.
///
/// The task ends when the socket rejects a write, or when every sender for the
/// buffer has been dropped (the Registry drops its copy on removal).
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Reads one frame at a time and feeds it to the session, in arrival order.
///
/// Stops reading once `writer_done` resolves, but only between frames: a frame
/// that is already being processed always runs to completion.
async fn read_loop<S, W>(receiver: &mut S, session: &mut ConnectionSession, writer_done: &mut W)
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
    W: Future + Unpin,
{
    loop {
        let next = tokio::select! {
            biased;
            _ = &mut *writer_done => {
                tracing::debug!("Writer of connection {} stopped", session.token());
                break;
            }
            next = receiver.next() => next,
        };
        let Some(msg) = next else {
            break;
        };
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error on connection {}: {}", session.token(), e);
                break;
            }
        };

        let result = match msg {
            Message::Text(text) => session.process_frame(text.as_str()).await,
            Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                Ok(text) => session.process_frame(text).await,
                Err(_) => {
                    tracing::warn!(
                        "Dropping non UTF-8 binary frame from connection {}",
                        session.token()
                    );
                    continue;
                }
            },
            Message::Close(_) => {
                tracing::info!("Connection {} requested close", session.token());
                break;
            }
            // Ping/pong is handled by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        if let Err(e) = result {
            tracing::error!("Session {} ended: {}", session.token(), e);
            break;
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, channel_id: ChannelId) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = state.channel_sync.accept(channel_id, tx).await;
    let mut send_task = pusher_loop(rx, sender);

    read_loop(&mut receiver, &mut session, &mut send_task).await;

    send_task.abort();
    session.close().await;
}
