use super::*;

impl UserService {
    /// Lists all registered users.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repository.list_users().await
    }
}
