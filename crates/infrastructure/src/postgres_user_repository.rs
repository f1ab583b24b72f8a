//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crudbase_application::UserRepository;
use crudbase_core::{AppError, AppResult, NonEmptyString};
use crudbase_domain::{ActiveSession, EmailAddress, User, UserId};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    active_token_hash: Option<String>,
    active_token_expires_at: Option<DateTime<Utc>>,
}

fn user_from_row(row: UserRow) -> AppResult<User> {
    let active_session = match (row.active_token_hash, row.active_token_expires_at) {
        (Some(token_hash), Some(expires_at)) => Some(ActiveSession::new(token_hash, expires_at)),
        _ => None,
    };

    Ok(User::restore(
        UserId::from_uuid(row.id),
        NonEmptyString::new(row.name)?,
        EmailAddress::new(row.email)?,
        NonEmptyString::new(row.password)?,
        row.created_at,
        active_session,
    ))
}

mod account;
mod lookup;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.list_users_impl().await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>> {
        self.find_by_email_impl(email).await
    }

    async fn find_by_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AppResult<Option<User>> {
        self.find_by_credentials_impl(email, password).await
    }

    async fn create_user(&self, user: User) -> AppResult<()> {
        self.create_user_impl(&user).await
    }

    async fn save_active_session(&self, user_id: UserId, session: ActiveSession) -> AppResult<()> {
        self.save_active_session_impl(user_id, &session).await
    }

    async fn find_by_session_token_hash(&self, token_hash: &str) -> AppResult<Option<User>> {
        self.find_by_session_token_hash_impl(token_hash).await
    }
}
