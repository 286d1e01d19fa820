//! Mock auth helpers for integration tests.
//!
//! Protected routes verify a signed bearer credential. `MockAuth` signs one with
//! [`TEST_JWT_SECRET`] so tests only need to build the service with the same secret.

use betengine_auth_types::token::{CredentialClaims, JwtSecret, sign_credential};
use betengine_domain::id::UserId;
use http::{HeaderName, HeaderValue, header::AUTHORIZATION};

/// Secret shared by `MockAuth` and test application state.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// Configurable identity for test requests.
pub struct MockAuth {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

impl MockAuth {
    pub fn affiliate(user_id: i32) -> Self {
        Self {
            user_id: UserId(user_id),
            email: format!("affiliate{user_id}@example.com"),
            name: format!("Affiliate {user_id}"),
            is_admin: false,
        }
    }

    pub fn admin(user_id: i32) -> Self {
        Self {
            user_id: UserId(user_id),
            email: format!("admin{user_id}@example.com"),
            name: format!("Admin {user_id}"),
            is_admin: true,
        }
    }

    pub fn secret() -> JwtSecret {
        JwtSecret::new(TEST_JWT_SECRET)
    }

    /// Signed credential for this identity, issued now.
    pub fn credential(&self) -> String {
        let claims = CredentialClaims::new(
            self.user_id,
            self.email.clone(),
            self.name.clone(),
            self.is_admin,
            chrono::Utc::now().timestamp() as u64,
        );
        sign_credential(&claims, &Self::secret()).expect("sign test credential")
    }

    /// `Authorization: Bearer <credential>` header pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.credential()))
            .expect("bearer header value");
        (AUTHORIZATION, value)
    }
}
