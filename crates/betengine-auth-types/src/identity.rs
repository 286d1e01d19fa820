//! Bearer credential extractors.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use betengine_core::error::error_response;
use betengine_domain::id::UserId;
use http::StatusCode;
use http::request::Parts;

use crate::token::{CredentialClaims, CredentialError, JwtSecret, validate_credential};

/// Caller identity decoded from `Authorization: Bearer <credential>`.
///
/// Returns 401 if the header or credential is absent, 403 if it fails verification.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

impl From<CredentialClaims> for Identity {
    fn from(claims: CredentialClaims) -> Self {
        Self {
            user_id: claims.id,
            email: claims.email,
            name: claims.name,
            is_admin: claims.is_admin,
        }
    }
}

/// An [`Identity`] whose credential carries `is_admin == true`. Otherwise 403.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

#[derive(Debug)]
pub enum IdentityRejection {
    Missing,
    Invalid(CredentialError),
    NotAdmin,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Missing => error_response(
                StatusCode::UNAUTHORIZED,
                "TOKEN_MISSING",
                "access token not provided",
            ),
            Self::Invalid(_) => error_response(
                StatusCode::FORBIDDEN,
                "INVALID_TOKEN",
                "invalid or expired token",
            ),
            Self::NotAdmin => error_response(
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "access denied, administrators only",
            ),
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn authenticate(parts: &Parts, secret: &JwtSecret) -> Result<Identity, IdentityRejection> {
    let token = bearer_token(parts).ok_or(IdentityRejection::Missing)?;
    let claims = validate_credential(token, secret).map_err(|e| {
        tracing::debug!(reason = %e, "credential rejected");
        IdentityRejection::Invalid(e)
    })?;
    Ok(claims.into())
}

impl<S> FromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    // axum-core 0.5 defines this as `fn -> impl Future + Send`; verification is
    // synchronous, so resolve it here and hand back a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(parts, &JwtSecret::from_ref(state));
        async move { result }
    }
}

impl<S> FromRequestParts<S> for AdminIdentity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(parts, &JwtSecret::from_ref(state)).and_then(|identity| {
            if identity.is_admin {
                Ok(AdminIdentity(identity))
            } else {
                Err(IdentityRejection::NotAdmin)
            }
        });
        async move { result }
    }
}
