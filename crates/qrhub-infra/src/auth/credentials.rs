//! Fixed credential table held in memory.

use std::collections::HashMap;

use async_trait::async_trait;

use qrhub_core::DomainError;
use qrhub_core::domain::Credential;
use qrhub_core::ports::{AuthError, CredentialStore, PasswordService};

/// Read-only credential store built once at startup.
pub struct InMemoryCredentialStore {
    users: HashMap<String, Credential>,
}

impl InMemoryCredentialStore {
    pub fn new(credentials: impl IntoIterator<Item = Credential>) -> Self {
        Self {
            users: credentials
                .into_iter()
                .map(|c| (c.username.clone(), c))
                .collect(),
        }
    }

    /// Single-user store; the cleartext password is hashed before it is kept.
    pub fn with_user(
        passwords: &dyn PasswordService,
        username: &str,
        password: &str,
    ) -> Result<Self, AuthError> {
        let hash = passwords.hash(password)?;
        Ok(Self::new([Credential::new(username, hash)]))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, DomainError> {
        Ok(self.users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Argon2PasswordService;

    #[tokio::test]
    async fn test_with_user_hashes_password() {
        let passwords = Argon2PasswordService::new();
        let store = InMemoryCredentialStore::with_user(&passwords, "admin", "secret").unwrap();

        let credential = store.find_by_username("admin").await.unwrap().unwrap();
        assert_ne!(credential.password_hash, "secret");
        assert!(passwords.verify("secret", &credential.password_hash).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let store = InMemoryCredentialStore::new([Credential::new("admin", "x")]);

        assert!(store.find_by_username("Admin").await.unwrap().is_none());
    }
}
