//! Shared utilities for the Chorus workspace.

pub mod logger;
pub mod time;
