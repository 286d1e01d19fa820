//! Bearer credential (HS256 JWT) validation and, behind `ISSUER`, signing.

use std::fmt;
use std::sync::Arc;

use betengine_domain::id::UserId;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Credential lifetime in seconds (7 days).
pub const CREDENTIAL_TTL_SECS: u64 = 604_800;

/// HMAC secret used to sign and verify credentials.
///
/// `Debug` never prints the secret.
#[derive(Clone)]
pub struct JwtSecret(Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(<redacted>)")
    }
}

/// Errors returned by [`validate_credential`].
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("credential expired")]
    Expired,
    #[error("malformed credential")]
    Malformed,
}

/// Claims carried by a credential.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `id` | user id |
/// | `email` | normalized email at issuance |
/// | `name` | display name at issuance |
/// | `is_admin` | admin flag at issuance; trusted until `exp` |
/// | `iat` / `exp` | seconds since UNIX epoch |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialClaims {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub iat: u64,
    pub exp: u64,
}

impl CredentialClaims {
    /// Claims valid for [`CREDENTIAL_TTL_SECS`] from `issued_at`.
    pub fn new(id: UserId, email: String, name: String, is_admin: bool, issued_at: u64) -> Self {
        Self {
            id,
            email,
            name,
            is_admin,
            iat: issued_at,
            exp: issued_at + CREDENTIAL_TTL_SECS,
        }
    }
}

/// Verify a credential and return its claims.
///
/// HS256 only, `exp` required and checked with the default 60s leeway.
pub fn validate_credential(token: &str, secret: &JwtSecret) -> Result<CredentialClaims, CredentialError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<CredentialClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => CredentialError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => CredentialError::InvalidSignature,
        _ => CredentialError::Malformed,
    })?;

    Ok(data.claims)
}

/// Sign claims into a compact HS256 credential.
#[cfg(any(feature = "ISSUER", test))]
pub fn sign_credential(
    claims: &CredentialClaims,
    secret: &JwtSecret,
) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )
}
