use std::collections::HashMap;

use async_trait::async_trait;
use crudbase_application::UserRepository;
use crudbase_core::{AppError, AppResult};
use crudbase_domain::{ActiveSession, EmailAddress, User, UserId};
use tokio::sync::RwLock;

/// In-memory user repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn oldest_matching(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .filter(|user| predicate(user))
            .min_by_key(|user| user.created_at())
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|left, right| {
            left.created_at()
                .cmp(&right.created_at())
                .then_with(|| left.email().as_str().cmp(right.email().as_str()))
        });
        Ok(users)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<User>> {
        Ok(self.oldest_matching(|user| user.email() == email).await)
    }

    async fn find_by_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AppResult<Option<User>> {
        Ok(self
            .oldest_matching(|user| user.email() == email && user.password() == password)
            .await)
    }

    async fn create_user(&self, user: User) -> AppResult<()> {
        self.users.write().await.insert(user.id(), user);
        Ok(())
    }

    async fn save_active_session(&self, user_id: UserId, session: ActiveSession) -> AppResult<()> {
        let mut users = self.users.write().await;
        let Some(user) = users.remove(&user_id) else {
            return Err(AppError::NotFound(format!("user '{user_id}' not found")));
        };

        users.insert(user_id, user.with_active_session(session));
        Ok(())
    }

    async fn find_by_session_token_hash(&self, token_hash: &str) -> AppResult<Option<User>> {
        Ok(self
            .oldest_matching(|user| {
                user.active_session()
                    .is_some_and(|session| session.token_hash() == token_hash)
            })
            .await)
    }
}
