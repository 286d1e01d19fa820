//! Test utilities for BetEngine services.
//!
//! Provides `MockAuth`, which mints real bearer credentials for a chosen identity.
//! Import in tests only, never in production code.

pub mod auth;
