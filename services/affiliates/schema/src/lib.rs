//! sea-orm entities for the affiliates service.

pub mod metrics;
pub mod users;
