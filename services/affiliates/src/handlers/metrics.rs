use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use betengine_auth_types::identity::Identity;
use betengine_domain::id::UserId;
use betengine_domain::metrics::MetricsChanges;
use betengine_domain::user::UserStatus;

use crate::error::AffiliatesServiceError;
use crate::state::AppState;
use crate::usecase::metrics::{GetOwnMetricsUseCase, UpdateOwnMetricsUseCase};

// ── GET /api/user/metrics ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MetricsResponse {
    pub user_id: UserId,
    pub balance: f64,
    pub ftds: i64,
    pub leads: i64,
    pub clicks: i64,
    pub cpa: f64,
    pub custom_link: Option<String>,
    pub status: UserStatus,
}

pub async fn get_own_metrics(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<MetricsResponse>, AffiliatesServiceError> {
    let usecase = GetOwnMetricsUseCase {
        repo: state.metrics_repo(),
    };
    let dashboard = usecase.execute(identity.user_id).await?;
    let metrics = dashboard.metrics;
    Ok(Json(MetricsResponse {
        user_id: metrics.user_id,
        balance: metrics.balance,
        ftds: metrics.ftds,
        leads: metrics.leads,
        clicks: metrics.clicks,
        cpa: metrics.cpa,
        custom_link: dashboard.custom_link,
        status: dashboard.status,
    }))
}

// ── POST /api/user/metrics ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateOwnMetricsRequest {
    pub balance: Option<f64>,
    pub ftds: Option<i64>,
    pub leads: Option<i64>,
    pub clicks: Option<i64>,
    pub cpa: Option<f64>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn update_own_metrics(
    identity: Identity,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<
        Json<UpdateOwnMetricsRequest>,
        AffiliatesServiceError,
    >,
) -> Result<Json<MessageResponse>, AffiliatesServiceError> {
    let usecase = UpdateOwnMetricsUseCase {
        repo: state.metrics_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            MetricsChanges {
                ftds: body.ftds,
                cpa: body.cpa,
                leads: body.leads,
                clicks: body.clicks,
                balance: body.balance,
            },
        )
        .await?;
    Ok(Json(MessageResponse {
        message: "metrics updated",
    }))
}
