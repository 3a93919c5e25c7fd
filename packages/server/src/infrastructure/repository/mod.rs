//! Repository 実装
//!
//! - `inmemory`: HashMap を使ったプロセス内ストア
//! - 将来的に: `mongodb`, `postgres` など

pub mod inmemory;

pub use inmemory::{InMemoryChannelRepository, InMemoryQueueStore};
