use betengine_domain::user::normalize_email;

/// Insecure signing secret used when `JWT_SECRET` is unset. Start-up logs a warning.
pub const FALLBACK_JWT_SECRET: &str = "betengine-super-secret-key-2026";

/// Affiliates service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AffiliatesConfig {
    /// sea-orm connection URL (Postgres or SQLite). Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for bearer credentials. `None` means the fallback is in use.
    pub jwt_secret: Option<String>,
    /// Normalized email auto-approved and elevated at registration.
    /// Env var: `BOOTSTRAP_ADMIN_EMAIL`.
    pub bootstrap_admin_email: Option<String>,
    /// TCP port to listen on (default 3000). Env var: `AFFILIATES_PORT`.
    pub affiliates_port: u16,
}

impl AffiliatesConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: var("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://betengine.sqlite?mode=rwc".to_owned()),
            jwt_secret: var("JWT_SECRET").filter(|s| !s.is_empty()),
            bootstrap_admin_email: var("BOOTSTRAP_ADMIN_EMAIL")
                .map(|e| normalize_email(&e))
                .filter(|e| !e.is_empty()),
            affiliates_port: var("AFFILIATES_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Configured secret, or [`FALLBACK_JWT_SECRET`].
    pub fn jwt_secret_or_fallback(&self) -> &str {
        self.jwt_secret.as_deref().unwrap_or(FALLBACK_JWT_SECRET)
    }
}
