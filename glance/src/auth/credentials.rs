use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{AuthConfig, UserEntry};

/// Who a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Identity {
    pub username: String,
    pub role: String,
}

/// Checks a username/password pair.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Option<Identity>;
}

/// Credential table loaded from configuration. Passwords are held only as
/// SHA-256 hex digests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    users: HashMap<String, UserEntry>,
}

impl StaticCredentialStore {
    pub fn new(users: impl IntoIterator<Item = UserEntry>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        if config.users.is_empty() {
            tracing::warn!("No users configured (GLANCE_USERS is empty); every login will be rejected");
        }
        Self::new(config.users.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> Option<Identity> {
        let user = self.users.get(username)?;
        let candidate = hash_password(password);

        constant_time_eq(candidate.as_bytes(), user.password_sha256.as_bytes()).then(|| Identity {
            username: user.username.clone(),
            role: user.role.clone(),
        })
    }
}

/// Lowercase hex SHA-256 digest of `password`, the format `GLANCE_USERS`
/// expects.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    format!("{digest:x}")
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StaticCredentialStore {
        StaticCredentialStore::new([UserEntry {
            username: "admin".to_string(),
            role: "admin".to_string(),
            password_sha256: hash_password("password123"),
        }])
    }

    #[test]
    fn hash_password_is_lowercase_hex() {
        let digest = hash_password("password123");
        assert_eq!(digest.len(), 64);
        assert_eq!(
            digest,
            "ef92b778bafe771e89245b89ecbc08a44a4e166c06659911881f383d4473e94f"
        );
    }

    #[tokio::test]
    async fn correct_password_yields_identity() {
        let identity = store().verify("admin", "password123").await;
        assert_eq!(
            identity,
            Some(Identity {
                username: "admin".to_string(),
                role: "admin".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn wrong_password_or_user_is_rejected() {
        assert_eq!(store().verify("admin", "password124").await, None);
        assert_eq!(store().verify("root", "password123").await, None);
        assert_eq!(store().verify("", "").await, None);
    }

    #[test]
    fn constant_time_eq_checks_length_and_bytes() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
