use betengine_domain::id::UserId;
use betengine_domain::metrics::MetricsChanges;

use crate::domain::repository::MetricsRepository;
use crate::domain::types::MetricsDashboard;
use crate::error::AffiliatesServiceError;

// ── GetOwnMetrics ────────────────────────────────────────────────────────────

pub struct GetOwnMetricsUseCase<R: MetricsRepository> {
    pub repo: R,
}

impl<R: MetricsRepository> GetOwnMetricsUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<MetricsDashboard, AffiliatesServiceError> {
        self.repo
            .find_dashboard(user_id)
            .await?
            .ok_or(AffiliatesServiceError::MetricsNotFound)
    }
}

// ── UpdateOwnMetrics ─────────────────────────────────────────────────────────

/// Overwrites the supplied fields of the caller's own row. No derivation.
pub struct UpdateOwnMetricsUseCase<R: MetricsRepository> {
    pub repo: R,
}

impl<R: MetricsRepository> UpdateOwnMetricsUseCase<R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        changes: MetricsChanges,
    ) -> Result<(), AffiliatesServiceError> {
        if changes.is_empty() {
            return Ok(());
        }
        self.repo.overwrite(user_id, &changes).await
    }
}
