use super::token_crypto::{generate_token, hash_token};
use super::*;

impl UserService {
    /// Authenticates a user by exact email and password match.
    ///
    /// A match issues a fresh session token and persists its digest and
    /// expiry on the user, replacing any earlier session. No match yields
    /// `AuthOutcome::NotFound` rather than an error.
    pub async fn auth(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let Ok(email) = EmailAddress::new(email) else {
            return Ok(AuthOutcome::NotFound);
        };

        let Some(user) = self
            .user_repository
            .find_by_credentials(&email, password)
            .await?
        else {
            return Ok(AuthOutcome::NotFound);
        };

        let (token, token_hash) = generate_token()?;
        let expires_at = Utc::now() + self.token_ttl;
        let session = ActiveSession::new(token_hash, expires_at);

        self.user_repository
            .save_active_session(user.id(), session.clone())
            .await?;

        Ok(AuthOutcome::Authenticated(AuthenticatedUser {
            user: user.with_active_session(session),
            token,
            expires_at,
        }))
    }

    /// Resolves the user owning an unexpired session token.
    pub async fn resolve_session(&self, token: &str) -> AppResult<User> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("session token is required".to_owned()));
        }

        let user = self
            .user_repository
            .find_by_session_token_hash(&hash_token(token))
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid session token".to_owned()))?;

        let is_active = user
            .active_session()
            .is_some_and(|session| !session.is_expired_at(Utc::now()));
        if !is_active {
            return Err(AppError::Unauthorized("session token has expired".to_owned()));
        }

        Ok(user)
    }
}
