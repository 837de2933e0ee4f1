//! Credential and token models for the password grant.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;
