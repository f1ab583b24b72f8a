//! User management ports and application service.
//!
//! Owns registration, credential lookup and session token issuance.
//! Credentials are compared verbatim; only session tokens are hashed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crudbase_core::{AppError, AppResult};
use crudbase_domain::{ActiveSession, EmailAddress, User, UserId};

mod login;
mod registration;
mod retrieval;
mod token_crypto;

/// Default lifetime of a session token.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists every user, oldest first.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Finds the oldest user registered with `email`.
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>>;

    /// Finds the oldest user whose email and password both match exactly.
    async fn find_by_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AppResult<Option<User>>;

    /// Persists a new user.
    async fn create_user(&self, user: User) -> AppResult<()>;

    /// Replaces the active session of a user.
    async fn save_active_session(&self, user_id: UserId, session: ActiveSession) -> AppResult<()>;

    /// Finds the user owning the session with `token_hash`, expired or not.
    async fn find_by_session_token_hash(&self, token_hash: &str) -> AppResult<Option<User>>;
}

// ---------------------------------------------------------------------------
// Outcomes and inputs
// ---------------------------------------------------------------------------

/// User returned by a successful login together with the raw session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The authenticated user, carrying the new active session.
    pub user: User,
    /// Raw bearer token. Only its digest is stored.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Result of a login attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// Credentials matched and a session was issued.
    Authenticated(AuthenticatedUser),
    /// No user matched the credentials.
    NotFound,
}

/// Result of a registration attempt.
#[derive(Debug)]
pub enum RegistrationOutcome {
    /// The user was created.
    Created(User),
    /// A user with the same email already exists. Nothing was written.
    AlreadyExists,
}

/// Parameters for user registration.
#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password, stored as supplied.
    pub password: String,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for user authentication and registration.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    token_ttl: Duration,
}

impl UserService {
    /// Creates a new user service issuing tokens valid for 24 hours.
    #[must_use]
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            user_repository,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Overrides the session token lifetime.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}
