//! Chorus listening-party server.
//!
//! Layers, from the inside out:
//!
//! - `domain`: value objects, entities, the queue scheduler, the session state
//!   machine and the ports the synchronization core depends on
//! - `usecase`: application flows, the per-connection session and the
//!   [`ChannelSync`](usecase::ChannelSync) facade
//! - `infrastructure`: connection registry, stores, credential verifier,
//!   song metadata resolver, DTOs
//! - `ui`: axum router and handlers

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
