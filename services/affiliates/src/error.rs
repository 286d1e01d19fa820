use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use betengine_core::error::error_response;

/// Affiliates service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AffiliatesServiceError {
    #[error("all fields are required")]
    MissingRegistrationFields,
    #[error("email and password are required")]
    MissingCredentials,
    #[error("invalid request body")]
    InvalidBody,
    #[error("invalid user id")]
    InvalidUserId,
    #[error("this email is already registered")]
    EmailTaken,
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("account under review")]
    PendingApproval,
    #[error("account rejected")]
    AccountRejected,
    #[error("user not found")]
    UserNotFound,
    #[error("metrics not found")]
    MetricsNotFound,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AffiliatesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingRegistrationFields => "MISSING_FIELDS",
            Self::MissingCredentials => "MISSING_CREDENTIALS",
            Self::InvalidBody => "INVALID_BODY",
            Self::InvalidUserId => "INVALID_USER_ID",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::PendingApproval => "PENDING_APPROVAL",
            Self::AccountRejected => "ACCOUNT_REJECTED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::MetricsNotFound => "METRICS_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AffiliatesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingRegistrationFields
            | Self::MissingCredentials
            | Self::InvalidBody
            | Self::InvalidUserId
            | Self::EmailTaken => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::PendingApproval | Self::AccountRejected => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::MetricsNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors; TraceLayer already records their status.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(status, self.kind(), &self.to_string())
    }
}

impl From<JsonRejection> for AffiliatesServiceError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "rejected request body");
        Self::InvalidBody
    }
}

impl From<PathRejection> for AffiliatesServiceError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "rejected path parameter");
        Self::InvalidUserId
    }
}
