use super::*;

impl PostgresUserRepository {
    pub(super) async fn list_users_impl(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password, created_at, active_token_hash, active_token_expires_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        rows.into_iter().map(user_from_row).collect()
    }

    pub(super) async fn find_by_email_impl(&self, email: &EmailAddress) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password, created_at, active_token_hash, active_token_expires_at
            FROM users
            WHERE email = $1
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user by email: {error}")))?;

        row.map(user_from_row).transpose()
    }

    pub(super) async fn find_by_credentials_impl(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password, created_at, active_token_hash, active_token_expires_at
            FROM users
            WHERE email = $1 AND password = $2
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find user by credentials: {error}"))
        })?;

        row.map(user_from_row).transpose()
    }

    pub(super) async fn find_by_session_token_hash_impl(
        &self,
        token_hash: &str,
    ) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password, created_at, active_token_hash, active_token_expires_at
            FROM users
            WHERE active_token_hash = $1
            LIMIT 1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find user by session token: {error}"))
        })?;

        row.map(user_from_row).transpose()
    }
}
