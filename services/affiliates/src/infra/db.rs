use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionError,
    TransactionTrait, UpdateMany, sea_query::Expr,
};

use betengine_affiliates_schema::{metrics, users};
use betengine_domain::id::UserId;
use betengine_domain::metrics::{MetricsChanges, MetricsPatch};
use betengine_domain::user::UserStatus;

use crate::domain::repository::{AccountRepository, MetricsRepository};
use crate::domain::types::{Account, AccountWithMetrics, Metrics, MetricsDashboard, NewAccount};
use crate::error::AffiliatesServiceError;

// ── Account repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn create_with_metrics(
        &self,
        account: &NewAccount,
    ) -> Result<Account, AffiliatesServiceError> {
        let result = self
            .db
            .transaction::<_, users::Model, DbErr>(|txn| {
                let account = account.clone();
                Box::pin(async move {
                    let user = users::ActiveModel {
                        id: NotSet,
                        name: Set(account.name),
                        email: Set(account.email),
                        password_hash: Set(account.password_hash),
                        whatsapp: Set(account.whatsapp),
                        pix_key: Set(account.pix_key),
                        is_admin: Set(account.is_admin),
                        status: Set(account.status.as_str().to_owned()),
                        custom_link: Set(None),
                    }
                    .insert(txn)
                    .await?;

                    metrics::Entity::insert(metrics_active_model(Metrics::zeroed(UserId(
                        user.id,
                    ))))
                    .exec(txn)
                    .await?;
                    Ok(user)
                })
            })
            .await;

        match result {
            Ok(model) => account_from_model(model),
            Err(e) if is_unique_violation(&e) => Err(AffiliatesServiceError::EmailTaken),
            Err(e) => Err(anyhow::Error::new(e)
                .context("create user with metrics")
                .into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AffiliatesServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, AffiliatesServiceError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(account_from_model).transpose()
    }

    async fn set_status(
        &self,
        id: UserId,
        status: UserStatus,
    ) -> Result<u64, AffiliatesServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Status, Expr::value(status.as_str()))
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("set user status")?;
        Ok(result.rows_affected)
    }

    async fn set_custom_link(
        &self,
        id: UserId,
        custom_link: Option<&str>,
    ) -> Result<u64, AffiliatesServiceError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::CustomLink,
                Expr::value(custom_link.map(str::to_owned)),
            )
            .filter(users::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("set user custom link")?;
        Ok(result.rows_affected)
    }

    async fn list_with_metrics(&self) -> Result<Vec<AccountWithMetrics>, AffiliatesServiceError> {
        let rows = users::Entity::find()
            .find_also_related(metrics::Entity)
            .order_by_desc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users with metrics")?;

        rows.into_iter()
            .map(|(user, metrics)| {
                account_from_model(user).map(|account| AccountWithMetrics {
                    account,
                    metrics: metrics.map(metrics_from_model),
                })
            })
            .collect()
    }
}

fn account_from_model(model: users::Model) -> Result<Account, AffiliatesServiceError> {
    let status = model
        .status
        .parse::<UserStatus>()
        .with_context(|| format!("user {} has unreadable status", model.id))?;
    Ok(Account {
        id: UserId(model.id),
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        whatsapp: model.whatsapp,
        pix_key: model.pix_key,
        is_admin: model.is_admin,
        status,
        custom_link: model.custom_link,
    })
}

fn is_unique_violation(err: &TransactionError<DbErr>) -> bool {
    match err {
        TransactionError::Connection(e) | TransactionError::Transaction(e) => {
            matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        }
    }
}

// ── Metrics repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMetricsRepository {
    pub db: DatabaseConnection,
}

impl MetricsRepository for DbMetricsRepository {
    async fn find_dashboard(
        &self,
        user_id: UserId,
    ) -> Result<Option<MetricsDashboard>, AffiliatesServiceError> {
        let row = users::Entity::find_by_id(user_id.0)
            .find_also_related(metrics::Entity)
            .one(&self.db)
            .await
            .context("find metrics dashboard")?;

        let Some((user, Some(metrics))) = row else {
            return Ok(None);
        };
        let account = account_from_model(user)?;
        Ok(Some(MetricsDashboard {
            metrics: metrics_from_model(metrics),
            custom_link: account.custom_link,
            status: account.status,
        }))
    }

    async fn overwrite(
        &self,
        user_id: UserId,
        changes: &MetricsChanges,
    ) -> Result<(), AffiliatesServiceError> {
        if changes.is_empty() {
            return Ok(());
        }
        with_changes(metrics::Entity::update_many(), changes)
            .filter(metrics::Column::UserId.eq(user_id.0))
            .exec(&self.db)
            .await
            .context("overwrite metrics")?;
        Ok(())
    }

    async fn apply_patch(
        &self,
        user_id: UserId,
        patch: &MetricsPatch,
    ) -> Result<bool, AffiliatesServiceError> {
        let patch = *patch;
        let found = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    // FOR UPDATE: concurrent patches must derive balance from committed values.
                    let Some(current) = metrics::Entity::find_by_id(user_id.0)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(false);
                    };

                    let changes = patch.resolve(current.ftds, current.cpa);
                    if !changes.is_empty() {
                        with_changes(metrics::Entity::update_many(), &changes)
                            .filter(metrics::Column::UserId.eq(user_id.0))
                            .exec(txn)
                            .await?;
                    }
                    Ok(true)
                })
            })
            .await
            .context("apply metrics patch")?;
        Ok(found)
    }
}

/// Stage every supplied column on a single UPDATE.
fn with_changes(
    mut update: UpdateMany<metrics::Entity>,
    changes: &MetricsChanges,
) -> UpdateMany<metrics::Entity> {
    if let Some(ftds) = changes.ftds {
        update = update.col_expr(metrics::Column::Ftds, Expr::value(ftds));
    }
    if let Some(cpa) = changes.cpa {
        update = update.col_expr(metrics::Column::Cpa, Expr::value(cpa));
    }
    if let Some(leads) = changes.leads {
        update = update.col_expr(metrics::Column::Leads, Expr::value(leads));
    }
    if let Some(clicks) = changes.clicks {
        update = update.col_expr(metrics::Column::Clicks, Expr::value(clicks));
    }
    if let Some(balance) = changes.balance {
        update = update.col_expr(metrics::Column::Balance, Expr::value(balance));
    }
    update
}

fn metrics_active_model(m: Metrics) -> metrics::ActiveModel {
    metrics::ActiveModel {
        user_id: Set(m.user_id.0),
        balance: Set(m.balance),
        ftds: Set(m.ftds),
        leads: Set(m.leads),
        clicks: Set(m.clicks),
        cpa: Set(m.cpa),
    }
}

fn metrics_from_model(model: metrics::Model) -> Metrics {
    Metrics {
        user_id: UserId(model.user_id),
        balance: model.balance,
        ftds: model.ftds,
        leads: model.leads,
        clicks: model.clicks,
        cpa: model.cpa,
    }
}
