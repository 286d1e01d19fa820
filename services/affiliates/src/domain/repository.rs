#![allow(async_fn_in_trait)]

use betengine_domain::id::UserId;
use betengine_domain::metrics::{MetricsChanges, MetricsPatch};
use betengine_domain::user::UserStatus;

use crate::domain::types::{Account, AccountWithMetrics, MetricsDashboard, NewAccount};
use crate::error::AffiliatesServiceError;

/// Repository for affiliate accounts.
pub trait AccountRepository: Send + Sync {
    /// Insert the account and its zero-valued metrics row in one transaction.
    ///
    /// Returns `EmailTaken` if the email is already registered; nothing is persisted then.
    async fn create_with_metrics(&self, account: &NewAccount)
    -> Result<Account, AffiliatesServiceError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AffiliatesServiceError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, AffiliatesServiceError>;

    /// Returns the number of rows affected (0 for an unknown id).
    async fn set_status(&self, id: UserId, status: UserStatus)
    -> Result<u64, AffiliatesServiceError>;

    /// Returns the number of rows affected (0 for an unknown id).
    async fn set_custom_link(
        &self,
        id: UserId,
        custom_link: Option<&str>,
    ) -> Result<u64, AffiliatesServiceError>;

    /// Every account with its metrics, id descending.
    async fn list_with_metrics(&self) -> Result<Vec<AccountWithMetrics>, AffiliatesServiceError>;
}

/// Repository for per-user metrics.
pub trait MetricsRepository: Send + Sync {
    async fn find_dashboard(
        &self,
        user_id: UserId,
    ) -> Result<Option<MetricsDashboard>, AffiliatesServiceError>;

    /// Overwrite exactly the supplied columns.
    async fn overwrite(
        &self,
        user_id: UserId,
        changes: &MetricsChanges,
    ) -> Result<(), AffiliatesServiceError>;

    /// Read the current row, resolve `patch` against it and write the result,
    /// all in one transaction. Returns `false` if the row does not exist.
    async fn apply_patch(
        &self,
        user_id: UserId,
        patch: &MetricsPatch,
    ) -> Result<bool, AffiliatesServiceError>;
}
