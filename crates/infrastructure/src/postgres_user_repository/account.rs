use super::*;

impl PostgresUserRepository {
    pub(super) async fn create_user_impl(&self, user: &User) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.name().as_str())
        .bind(user.email().as_str())
        .bind(user.password())
        .bind(user.created_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "user '{}' already exists",
                        user.id()
                    )));
                }

                Err(AppError::Internal(format!("failed to create user: {error}")))
            }
        }
    }

    pub(super) async fn save_active_session_impl(
        &self,
        user_id: UserId,
        session: &ActiveSession,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET active_token_hash = $2, active_token_expires_at = $3
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(session.token_hash())
        .bind(session.expires_at())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to save session for user '{user_id}': {error}"
            ))
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user '{user_id}' not found")));
        }

        Ok(())
    }
}
