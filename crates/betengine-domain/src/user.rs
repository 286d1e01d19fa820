//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Approval state of an affiliate account.
///
/// Wire and storage format: lowercase string (`"pending"`, `"approved"`, `"rejected"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string cannot be parsed as a [`UserStatus`].
#[derive(Debug, Error)]
#[error("unknown user status: {0:?}")]
pub struct UnknownUserStatus(pub String);

impl FromStr for UserStatus {
    type Err = UnknownUserStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownUserStatus(other.to_owned())),
        }
    }
}

/// Canonical form of an email address: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Initial standing of a freshly registered account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialStanding {
    pub status: UserStatus,
    pub is_admin: bool,
}

/// Decide the initial standing of an account from its normalized email.
///
/// Only the configured bootstrap admin address is approved and elevated at
/// creation. Email uniqueness means this matches at most one account.
pub fn initial_standing(normalized_email: &str, bootstrap_admin: Option<&str>) -> InitialStanding {
    match bootstrap_admin {
        Some(admin) if admin == normalized_email => InitialStanding {
            status: UserStatus::Approved,
            is_admin: true,
        },
        _ => InitialStanding {
            status: UserStatus::Pending,
            is_admin: false,
        },
    }
}
