use betengine_domain::id::UserId;
use betengine_domain::user::UserStatus;

/// Affiliate account as stored. `password_hash` never leaves the service.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub whatsapp: String,
    pub pix_key: String,
    pub is_admin: bool,
    pub status: UserStatus,
    pub custom_link: Option<String>,
}

/// Account to be inserted; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub whatsapp: String,
    pub pix_key: String,
    pub is_admin: bool,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub user_id: UserId,
    pub balance: f64,
    pub ftds: i64,
    pub leads: i64,
    pub clicks: i64,
    pub cpa: f64,
}

impl Metrics {
    pub fn zeroed(user_id: UserId) -> Self {
        Self {
            user_id,
            balance: 0.0,
            ftds: 0,
            leads: 0,
            clicks: 0,
            cpa: 0.0,
        }
    }
}

/// Metrics row joined with the owner's link and approval state.
#[derive(Debug, Clone)]
pub struct MetricsDashboard {
    pub metrics: Metrics,
    pub custom_link: Option<String>,
    pub status: UserStatus,
}

/// Directory entry. `metrics` is `None` when the row is absent.
#[derive(Debug, Clone)]
pub struct AccountWithMetrics {
    pub account: Account,
    pub metrics: Option<Metrics>,
}
