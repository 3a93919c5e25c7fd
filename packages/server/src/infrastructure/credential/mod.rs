//! Credential verification implementations.

pub mod jwt;

pub use jwt::{AccessClaims, JwtCredentialVerifier};
