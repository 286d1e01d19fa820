use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use betengine_domain::id::UserId;
use betengine_domain::user::UserStatus;

use crate::domain::types::Account;
use crate::error::AffiliatesServiceError;
use crate::state::AppState;
use crate::usecase::auth::{
    LoginInput, LoginUseCase, RegisterInput, RegisterOutput, RegisterUseCase,
};
use crate::usecase::token::AuthenticatedAccount;

/// Public projection of an account. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub pix_key: String,
    pub is_admin: bool,
    pub status: UserStatus,
    pub custom_link: Option<String>,
}

impl From<Account> for UserResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            whatsapp: account.whatsapp,
            pix_key: account.pix_key,
            is_admin: account.is_admin,
            status: account.status,
            custom_link: account.custom_link,
        }
    }
}

#[derive(Serialize)]
pub struct CredentialResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthenticatedAccount> for CredentialResponse {
    fn from(authenticated: AuthenticatedAccount) -> Self {
        Self {
            token: authenticated.credential,
            user: authenticated.account.into(),
        }
    }
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub pix_key: String,
}

#[derive(Serialize)]
pub struct PendingApprovalResponse {
    pub message: &'static str,
    pub code: &'static str,
}

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, AffiliatesServiceError>,
) -> Result<Response, AffiliatesServiceError> {
    let usecase = RegisterUseCase {
        repo: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
        bootstrap_admin_email: state.bootstrap_admin_email.clone(),
    };
    let output = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
            whatsapp: body.whatsapp,
            pix_key: body.pix_key,
        })
        .await?;

    let response = match output {
        RegisterOutput::Approved(authenticated) => {
            (StatusCode::OK, Json(CredentialResponse::from(authenticated))).into_response()
        }
        RegisterOutput::PendingApproval => (
            StatusCode::CREATED,
            Json(PendingApprovalResponse {
                message: "registration received, your account is awaiting approval",
                code: "PENDING_APPROVAL",
            }),
        )
            .into_response(),
    };
    Ok(response)
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginRequest>, AffiliatesServiceError>,
) -> Result<Json<CredentialResponse>, AffiliatesServiceError> {
    let usecase = LoginUseCase {
        repo: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let authenticated = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(authenticated.into()))
}
