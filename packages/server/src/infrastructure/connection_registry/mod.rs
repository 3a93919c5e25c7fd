//! コネクションレジストリの実装
//!
//! - `websocket`: WebSocket の送信バッファを使った実装

pub mod websocket;

pub use websocket::WebSocketConnectionRegistry;
