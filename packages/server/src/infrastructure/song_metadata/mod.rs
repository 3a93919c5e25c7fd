//! Song metadata resolver implementations.

pub mod youtube;

pub use youtube::YouTubeMetadataResolver;
