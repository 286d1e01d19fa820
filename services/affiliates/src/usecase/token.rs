use anyhow::Context as _;
use chrono::Utc;

use betengine_auth_types::token::{CredentialClaims, JwtSecret, sign_credential};

use crate::domain::types::Account;
use crate::error::AffiliatesServiceError;

/// An account together with a freshly signed bearer credential.
#[derive(Debug)]
pub struct AuthenticatedAccount {
    pub account: Account,
    pub credential: String,
}

/// Sign a credential binding the account's id, email, name and admin flag.
pub fn issue_credential(
    account: &Account,
    secret: &JwtSecret,
) -> Result<String, AffiliatesServiceError> {
    let claims = CredentialClaims::new(
        account.id,
        account.email.clone(),
        account.name.clone(),
        account.is_admin,
        Utc::now().timestamp() as u64,
    );
    let token = sign_credential(&claims, secret).context("sign credential")?;
    Ok(token)
}
