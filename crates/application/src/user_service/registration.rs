use super::*;

impl UserService {
    /// Registers a user after checking that the email is not taken yet.
    ///
    /// The check and the insert are separate store calls, so two concurrent
    /// registrations of the same email may both succeed.
    pub async fn create_user(&self, input: RegisterUserInput) -> AppResult<RegistrationOutcome> {
        let email = EmailAddress::new(input.email)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Ok(RegistrationOutcome::AlreadyExists);
        }

        let user = User::new(input.name, email, input.password)?;
        self.user_repository.create_user(user.clone()).await?;

        Ok(RegistrationOutcome::Created(user))
    }
}
