use betengine_auth_types::token::JwtSecret;
use betengine_domain::id::UserId;
use betengine_domain::metrics::MetricsPatch;
use betengine_domain::user::UserStatus;
use tracing::{debug, info, warn};

use crate::domain::repository::{AccountRepository, MetricsRepository};
use crate::domain::types::AccountWithMetrics;
use crate::error::AffiliatesServiceError;
use crate::usecase::token::{AuthenticatedAccount, issue_credential};

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<AccountWithMetrics>, AffiliatesServiceError> {
        self.repo.list_with_metrics().await
    }
}

// ── SetUserStatus (approve / reject) ─────────────────────────────────────────

/// Unconditional and idempotent; an unknown id is a silent success.
pub struct SetUserStatusUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> SetUserStatusUseCase<R> {
    pub async fn execute(
        &self,
        admin_id: UserId,
        user_id: UserId,
        status: UserStatus,
    ) -> Result<(), AffiliatesServiceError> {
        let affected = self.repo.set_status(user_id, status).await?;
        if affected == 0 {
            debug!(%user_id, %status, "status change matched no user");
        } else {
            info!(%admin_id, %user_id, %status, "user status changed");
        }
        Ok(())
    }
}

// ── SetUserLink ──────────────────────────────────────────────────────────────

pub struct SetUserLinkUseCase<R: AccountRepository> {
    pub repo: R,
}

impl<R: AccountRepository> SetUserLinkUseCase<R> {
    /// `None` clears the link.
    pub async fn execute(
        &self,
        user_id: UserId,
        custom_link: Option<String>,
    ) -> Result<(), AffiliatesServiceError> {
        let affected = self
            .repo
            .set_custom_link(user_id, custom_link.as_deref())
            .await?;
        if affected == 0 {
            debug!(%user_id, "link assignment matched no user");
        }
        Ok(())
    }
}

// ── Impersonate ──────────────────────────────────────────────────────────────

pub struct ImpersonateUseCase<R: AccountRepository> {
    pub repo: R,
    pub jwt_secret: JwtSecret,
}

impl<R: AccountRepository> ImpersonateUseCase<R> {
    /// Issue a credential carrying the target's own claims, including their admin flag.
    pub async fn execute(
        &self,
        admin_id: UserId,
        target_id: UserId,
    ) -> Result<AuthenticatedAccount, AffiliatesServiceError> {
        let account = self
            .repo
            .find_by_id(target_id)
            .await?
            .ok_or(AffiliatesServiceError::UserNotFound)?;

        warn!(%admin_id, %target_id, "admin impersonating user");

        let credential = issue_credential(&account, &self.jwt_secret)?;
        Ok(AuthenticatedAccount {
            account,
            credential,
        })
    }
}

// ── UpdateUserMetrics ────────────────────────────────────────────────────────

/// Applies the balance derivation rule inside one transaction.
pub struct UpdateUserMetricsUseCase<R: MetricsRepository> {
    pub repo: R,
}

impl<R: MetricsRepository> UpdateUserMetricsUseCase<R> {
    pub async fn execute(
        &self,
        user_id: UserId,
        patch: MetricsPatch,
    ) -> Result<(), AffiliatesServiceError> {
        if !self.repo.apply_patch(user_id, &patch).await? {
            return Err(AffiliatesServiceError::MetricsNotFound);
        }
        Ok(())
    }
}
