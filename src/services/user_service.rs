use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth;
use crate::config::SecurityConfig;
use crate::models::{next_id, Credentials, PublicUser, TokenResponse, User};
use crate::storage::{RecordStore, StorageError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("No user with that email")]
    UnknownEmail,

    #[error("Password does not match")]
    InvalidPassword,

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Registered accounts and their bearer tokens.
///
/// Registration holds the write lock while it checks for a duplicate email
/// and appends, so two concurrent sign-ups with one address cannot both win.
pub struct UserStore {
    backend: Arc<dyn RecordStore<User>>,
    lock: RwLock<()>,
    bcrypt_cost: u32,
    token_bytes: usize,
}

impl UserStore {
    pub fn new(backend: Arc<dyn RecordStore<User>>, security: &SecurityConfig) -> Self {
        Self {
            backend,
            lock: RwLock::new(()),
            bcrypt_cost: security.bcrypt_cost,
            token_bytes: security.token_bytes,
        }
    }

    /// Create an account. The token is issued here and never changes.
    pub async fn register(&self, credentials: Credentials) -> Result<PublicUser, AuthError> {
        let Credentials { email, password } = credentials;

        auth::validate_email_format(&email).map_err(AuthError::InvalidInput)?;
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password cannot be empty".to_string()));
        }

        // Hash outside the lock; bcrypt takes far longer than the file rewrite
        let password_hash = auth::hash_password(password, self.bcrypt_cost).await?;

        let _guard = self.lock.write().await;
        let mut users = self.backend.load().await?;

        if users.iter().any(|user| user.email == email) {
            warn!("Registration rejected, email already in use: {}", email);
            return Err(AuthError::EmailTaken(email));
        }

        let id = next_id(&users).ok_or(StorageError::IdsExhausted)?;
        let user = User {
            id,
            email,
            password_hash,
            token: auth::generate_token(self.token_bytes),
        };
        users.push(user.clone());
        self.backend.save(&users).await?;

        info!(store = %self.backend.location(), "Registered user {} ({})", user.id, user.email);
        Ok(PublicUser::from(&user))
    }

    /// Exchange credentials for the account's token
    pub async fn login(&self, credentials: Credentials) -> Result<TokenResponse, AuthError> {
        let Credentials { email, password } = credentials;

        let user = self
            .find_by(|user| user.email == email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed, unknown email: {}", email);
                AuthError::UnknownEmail
            })?;

        if !auth::verify_password(password, user.password_hash).await? {
            warn!("Login failed, bad password for user {}", user.id);
            return Err(AuthError::InvalidPassword);
        }

        Ok(TokenResponse { token: user.token })
    }

    /// The user owning `token`, if any. An empty token never matches.
    pub async fn validate_token(&self, token: &str) -> Result<Option<User>, StorageError> {
        if token.is_empty() {
            return Ok(None);
        }
        self.find_by(|user| user.token == token).await
    }

    pub async fn count(&self) -> Result<usize, StorageError> {
        let _guard = self.lock.read().await;
        Ok(self.backend.load().await?.len())
    }

    async fn find_by(&self, predicate: impl Fn(&User) -> bool) -> Result<Option<User>, StorageError> {
        let _guard = self.lock.read().await;
        Ok(self.backend.load().await?.into_iter().find(|user| predicate(user)))
    }
}
