use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use betengine_auth_types::token::JwtSecret;

use crate::infra::db::{DbAccountRepository, DbMetricsRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    /// Normalized email that is approved and elevated at registration.
    pub bootstrap_admin_email: Option<String>,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn metrics_repo(&self) -> DbMetricsRepository {
        DbMetricsRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}
