//! Infrastructure layer: concrete implementations of the domain ports.

pub mod connection_registry;
pub mod credential;
pub mod dto;
pub mod repository;
pub mod song_metadata;
