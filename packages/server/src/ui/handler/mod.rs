//! Request handlers.

mod http;
mod websocket;

pub use http::{create_channel, get_channel_snapshot, health_check, lookup_song};
pub use websocket::websocket_handler;
