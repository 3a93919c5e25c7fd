//! インメモリ実装

pub mod channel;
pub mod queue;

pub use channel::InMemoryChannelRepository;
pub use queue::InMemoryQueueStore;
