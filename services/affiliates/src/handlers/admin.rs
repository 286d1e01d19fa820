use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use betengine_auth_types::identity::AdminIdentity;
use betengine_domain::id::UserId;
use betengine_domain::metrics::MetricsPatch;
use betengine_domain::user::UserStatus;

use crate::error::AffiliatesServiceError;
use crate::handlers::auth::{CredentialResponse, UserResponse};
use crate::state::AppState;
use crate::usecase::admin::{
    ImpersonateUseCase, ListUsersUseCase, SetUserLinkUseCase, SetUserStatusUseCase,
    UpdateUserMetricsUseCase,
};

type UserIdPath = WithRejection<Path<UserId>, AffiliatesServiceError>;

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

fn success() -> Json<SuccessResponse> {
    Json(SuccessResponse { success: true })
}

// ── GET /api/admin/users ─────────────────────────────────────────────────────

/// Directory row: the public projection plus joined metrics (null when absent).
#[derive(Serialize)]
pub struct AdminUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub balance: Option<f64>,
    pub ftds: Option<i64>,
    pub leads: Option<i64>,
    pub clicks: Option<i64>,
    pub cpa: Option<f64>,
}

pub async fn list_users(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminUserResponse>>, AffiliatesServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.account_repo(),
    };
    let rows = usecase.execute().await?;
    let users = rows
        .into_iter()
        .map(|row| {
            let metrics = row.metrics;
            AdminUserResponse {
                user: row.account.into(),
                balance: metrics.as_ref().map(|m| m.balance),
                ftds: metrics.as_ref().map(|m| m.ftds),
                leads: metrics.as_ref().map(|m| m.leads),
                clicks: metrics.as_ref().map(|m| m.clicks),
                cpa: metrics.as_ref().map(|m| m.cpa),
            }
        })
        .collect();
    Ok(Json(users))
}

// ── POST /api/admin/users/{id}/approve ───────────────────────────────────────

pub async fn approve_user(
    AdminIdentity(admin): AdminIdentity,
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): UserIdPath,
) -> Result<Json<SuccessResponse>, AffiliatesServiceError> {
    let usecase = SetUserStatusUseCase {
        repo: state.account_repo(),
    };
    usecase
        .execute(admin.user_id, user_id, UserStatus::Approved)
        .await?;
    Ok(success())
}

// ── POST /api/admin/users/{id}/reject ────────────────────────────────────────

pub async fn reject_user(
    AdminIdentity(admin): AdminIdentity,
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): UserIdPath,
) -> Result<Json<SuccessResponse>, AffiliatesServiceError> {
    let usecase = SetUserStatusUseCase {
        repo: state.account_repo(),
    };
    usecase
        .execute(admin.user_id, user_id, UserStatus::Rejected)
        .await?;
    Ok(success())
}

// ── POST /api/admin/users/{id}/link ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetLinkRequest {
    /// Absent or null clears the link.
    #[serde(default)]
    pub custom_link: Option<String>,
}

pub async fn set_user_link(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): UserIdPath,
    WithRejection(Json(body), _): WithRejection<Json<SetLinkRequest>, AffiliatesServiceError>,
) -> Result<Json<SuccessResponse>, AffiliatesServiceError> {
    let usecase = SetUserLinkUseCase {
        repo: state.account_repo(),
    };
    usecase.execute(user_id, body.custom_link).await?;
    Ok(success())
}

// ── POST /api/admin/impersonate/{id} ─────────────────────────────────────────

pub async fn impersonate_user(
    AdminIdentity(admin): AdminIdentity,
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): UserIdPath,
) -> Result<Json<CredentialResponse>, AffiliatesServiceError> {
    let usecase = ImpersonateUseCase {
        repo: state.account_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let authenticated = usecase.execute(admin.user_id, user_id).await?;
    Ok(Json(authenticated.into()))
}

// ── POST /api/admin/users/{id}/metrics ───────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserMetricsRequest {
    pub ftds: Option<i64>,
    pub cpa: Option<f64>,
    pub leads: Option<i64>,
    pub clicks: Option<i64>,
    pub balance: Option<f64>,
}

pub async fn update_user_metrics(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    WithRejection(Path(user_id), _): UserIdPath,
    WithRejection(Json(body), _): WithRejection<
        Json<UpdateUserMetricsRequest>,
        AffiliatesServiceError,
    >,
) -> Result<Json<SuccessResponse>, AffiliatesServiceError> {
    let usecase = UpdateUserMetricsUseCase {
        repo: state.metrics_repo(),
    };
    usecase
        .execute(
            user_id,
            MetricsPatch {
                ftds: body.ftds,
                cpa: body.cpa,
                leads: body.leads,
                clicks: body.clicks,
                balance: body.balance,
            },
        )
        .await?;
    Ok(success())
}
