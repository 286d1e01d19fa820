use betengine_auth_types::token::JwtSecret;
use betengine_domain::user::{UserStatus, initial_standing, normalize_email};
use tracing::info;

use crate::domain::repository::AccountRepository;
use crate::domain::types::NewAccount;
use crate::error::AffiliatesServiceError;
use crate::password::{hash_in_background, verify_in_background};
use crate::usecase::token::{AuthenticatedAccount, issue_credential};

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub whatsapp: String,
    pub pix_key: String,
}

#[derive(Debug)]
pub enum RegisterOutput {
    /// Account created and awaiting admin approval; no credential issued.
    PendingApproval,
    /// Bootstrap admin: approved at creation and signed in immediately.
    Approved(AuthenticatedAccount),
}

pub struct RegisterUseCase<R: AccountRepository> {
    pub repo: R,
    pub jwt_secret: JwtSecret,
    pub bootstrap_admin_email: Option<String>,
}

impl<R: AccountRepository> RegisterUseCase<R> {
    pub async fn execute(
        &self,
        input: RegisterInput,
    ) -> Result<RegisterOutput, AffiliatesServiceError> {
        // Only email and password are normalized; the rest is stored as given.
        let email = normalize_email(&input.email);
        let password = input.password.trim();
        if [
            input.name.as_str(),
            email.as_str(),
            password,
            input.whatsapp.as_str(),
            input.pix_key.as_str(),
        ]
        .iter()
        .any(|field| field.trim().is_empty())
        {
            return Err(AffiliatesServiceError::MissingRegistrationFields);
        }
        let password_hash = hash_in_background(password.to_owned()).await?;

        let standing = initial_standing(&email, self.bootstrap_admin_email.as_deref());
        let account = self
            .repo
            .create_with_metrics(&NewAccount {
                name: input.name,
                email,
                password_hash,
                whatsapp: input.whatsapp,
                pix_key: input.pix_key,
                is_admin: standing.is_admin,
                status: standing.status,
            })
            .await?;

        info!(user_id = %account.id, status = %account.status, "affiliate registered");

        if account.status != UserStatus::Approved {
            return Ok(RegisterOutput::PendingApproval);
        }
        let credential = issue_credential(&account, &self.jwt_secret)?;
        Ok(RegisterOutput::Approved(AuthenticatedAccount {
            account,
            credential,
        }))
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: AccountRepository> {
    pub repo: R,
    pub jwt_secret: JwtSecret,
}

impl<R: AccountRepository> LoginUseCase<R> {
    pub async fn execute(
        &self,
        input: LoginInput,
    ) -> Result<AuthenticatedAccount, AffiliatesServiceError> {
        let email = normalize_email(&input.email);
        let password = input.password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AffiliatesServiceError::MissingCredentials);
        }

        let account = self.repo.find_by_email(&email).await?;
        // Unknown emails still pay for a verification.
        let stored_hash = account.as_ref().map(|a| a.password_hash.clone());
        let matched = verify_in_background(password.to_owned(), stored_hash).await?;

        let Some(account) = account else {
            info!(reason = "unknown_email", "login failed");
            return Err(AffiliatesServiceError::InvalidCredentials);
        };
        if !matched {
            info!(user_id = %account.id, reason = "wrong_password", "login failed");
            return Err(AffiliatesServiceError::InvalidCredentials);
        }

        match account.status {
            UserStatus::Pending => {
                info!(user_id = %account.id, reason = "pending_approval", "login refused");
                Err(AffiliatesServiceError::PendingApproval)
            }
            UserStatus::Rejected => {
                info!(user_id = %account.id, reason = "rejected", "login refused");
                Err(AffiliatesServiceError::AccountRejected)
            }
            UserStatus::Approved => {
                let credential = issue_credential(&account, &self.jwt_secret)?;
                Ok(AuthenticatedAccount {
                    account,
                    credential,
                })
            }
        }
    }
}
