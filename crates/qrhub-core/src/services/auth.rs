//! Login and token verification.

use std::sync::Arc;

use crate::error::DomainError;
use crate::ports::{AuthError, CredentialStore, PasswordService, TokenClaims, TokenService};

pub const TOKEN_TYPE: &str = "bearer";

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// Verifies credentials and issues bearer tokens.
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            credentials,
            passwords,
            tokens,
        }
    }

    /// Exchange a username/password pair for an access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        if username.trim().is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password must not be empty"));
        }

        let Some(credential) = self.credentials.find_by_username(username).await? else {
            tracing::warn!(username = %username, "Login attempt for unknown user");
            return Err(DomainError::Unauthorized);
        };

        let valid = self
            .passwords
            .verify(password, &credential.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if !valid {
            tracing::warn!(username = %username, "Login attempt with wrong password");
            return Err(DomainError::Unauthorized);
        }

        let access_token = self
            .tokens
            .generate_token(&credential.username)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(username = %credential.username, "Access token issued");

        Ok(IssuedToken {
            access_token,
            token_type: TOKEN_TYPE,
            expires_in: self.tokens.expiration_seconds().max(0) as u64,
        })
    }

    /// Validate a bearer token presented on a protected call.
    pub fn authenticate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingAuth);
        }
        self.tokens.validate_token(token)
    }
}
