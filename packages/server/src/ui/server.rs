//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{ChannelSync, CreateChannelUseCase, LookupSongUseCase};

use super::{
    handler::{
        create_channel, get_channel_snapshot, health_check, lookup_song, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Listening-party server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(channel_sync, create_channel_usecase, lookup_song_usecase);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    channel_sync: Arc<ChannelSync>,
    create_channel_usecase: Arc<CreateChannelUseCase>,
    lookup_song_usecase: Arc<LookupSongUseCase>,
}

impl Server {
    pub fn new(
        channel_sync: Arc<ChannelSync>,
        create_channel_usecase: Arc<CreateChannelUseCase>,
        lookup_song_usecase: Arc<LookupSongUseCase>,
    ) -> Self {
        Self {
            channel_sync,
            create_channel_usecase,
            lookup_song_usecase,
        }
    }

    /// Build the router with all endpoints
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            channel_sync: self.channel_sync,
            create_channel_usecase: self.create_channel_usecase,
            lookup_song_usecase: self.lookup_song_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws/channels/{channel_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/channels", post(create_channel))
            .route("/api/channels/{channel_id}", get(get_channel_snapshot))
            .route("/api/songs/{song_id}", get(lookup_song))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), BoxError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener (tests bind to port 0)
    pub async fn serve(self, listener: TcpListener) -> Result<(), BoxError> {
        let local_addr = listener.local_addr()?;
        let app = self.router();

        tracing::info!("Chorus server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws/channels/{{channel_id}}", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
