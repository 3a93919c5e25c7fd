//! Chorus listening-party server.
//!
//! Channels share a chat history and a song queue; every connected player
//! derives playback position from the scheduled start times.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chorus-server
//! cargo run --bin chorus-server -- --host 0.0.0.0 --port 3000
//! SECRET_KEY=... YOUTUBE_API_KEY=... cargo run --bin chorus-server
//! ```

use std::{sync::Arc, time::Duration};

use chorus_server::{
    infrastructure::{
        connection_registry::WebSocketConnectionRegistry,
        credential::JwtCredentialVerifier,
        repository::{InMemoryChannelRepository, InMemoryQueueStore},
        song_metadata::YouTubeMetadataResolver,
    },
    ui::Server,
    usecase::{ChannelSync, CreateChannelUseCase, LookupSongUseCase},
};
use chorus_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chorus-server")]
#[command(about = "Listening-party server with synchronized song queues", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "CHORUS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "CHORUS_PORT", default_value = "8080")]
    port: u16,

    /// HS512 secret used to verify access tokens
    #[arg(long, env = "SECRET_KEY", default_value = "secret", hide_env_values = true)]
    secret_key: String,

    /// YouTube Data API key; song requests fail without it
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    youtube_api_key: Option<String>,

    /// Timeout for one metadata lookup
    #[arg(long, env = "CHORUS_METADATA_TIMEOUT_SECS", default_value = "10")]
    metadata_timeout_secs: u64,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if args.youtube_api_key.is_none() {
        tracing::warn!("YOUTUBE_API_KEY is not set; song requests will be rejected");
    }

    // Initialize dependencies in order:
    // 1. Registry and stores
    // 2. Collaborators
    // 3. UseCases
    // 4. Server

    // 1. Registry and stores (in-memory)
    let registry = Arc::new(WebSocketConnectionRegistry::new());
    let channels = Arc::new(InMemoryChannelRepository::new());
    let queues = Arc::new(InMemoryQueueStore::new());
    let clock = Arc::new(SystemClock);

    // 2. Collaborators
    let verifier = Arc::new(JwtCredentialVerifier::new(&args.secret_key));
    let resolver = match YouTubeMetadataResolver::new(
        args.youtube_api_key,
        Duration::from_secs(args.metadata_timeout_secs),
    ) {
        Ok(resolver) => Arc::new(resolver),
        Err(e) => {
            tracing::error!("Failed to build metadata client: {}", e);
            std::process::exit(1);
        }
    };

    // 3. UseCases
    let channel_sync = Arc::new(ChannelSync::new(
        registry,
        channels.clone(),
        queues,
        verifier.clone(),
        resolver.clone(),
        channels.clone(),
        clock.clone(),
    ));
    let create_channel_usecase = Arc::new(CreateChannelUseCase::new(verifier, channels, clock));
    let lookup_song_usecase = Arc::new(LookupSongUseCase::new(resolver));

    // 4. Server
    let server = Server::new(channel_sync, create_channel_usecase, lookup_song_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
