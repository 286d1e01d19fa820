//! Credential contract shared by BetEngine services.
//!
//! Provides bearer credential validation (and signing behind the `ISSUER`
//! feature) plus the `Identity` / `AdminIdentity` extractors.

pub mod identity;
pub mod token;
