//! Account registration and sign-in.

use std::sync::Arc;

use super::outcome::Submission;
use crate::domain::User;
use crate::error::DomainError;
use crate::forms::{FormErrors, LoginForm, RegistrationForm, USERNAME_TAKEN};
use crate::ports::{PasswordService, UserRepository};

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Create a regular account from a registration form.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Submission<User>, DomainError> {
        let account = match form.validate() {
            Ok(account) => account,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };

        if self.users.find_by_username(&account.username).await?.is_some() {
            let mut errors = FormErrors::new();
            errors.add("username", USERNAME_TAKEN);
            return Ok(Submission::Rejected(errors));
        }

        let password_hash = self
            .passwords
            .hash(&account.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let user = self.users.create(User::new(account.username, password_hash)).await?;
        tracing::info!(username = %user.username, "Account registered");

        Ok(Submission::Accepted(user))
    }

    /// Check a username/password pair.
    pub async fn authenticate(&self, form: &LoginForm) -> Result<Submission<User>, DomainError> {
        let (username, password) = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };

        let Some(user) = self.users.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Login for unknown user");
            return Ok(Submission::Rejected(LoginForm::invalid_credentials()));
        };

        let valid = self
            .passwords
            .verify(&password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            tracing::debug!(username = %username, "Login with wrong password");
            return Ok(Submission::Rejected(LoginForm::invalid_credentials()));
        }

        Ok(Submission::Accepted(user))
    }

    /// Make sure a staff account with these credentials exists.
    ///
    /// An existing user is promoted and gets the new password.
    pub async fn ensure_staff(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = match self.users.find_by_username(username).await? {
            Some(mut user) => {
                user.is_staff = true;
                user.password_hash = password_hash;
                user.updated_at = chrono::Utc::now();
                self.users.update(user).await?
            }
            None => {
                self.users
                    .create(User::new(username.to_string(), password_hash).staff())
                    .await?
            }
        };
        tracing::info!(username = %user.username, "Staff account ready");

        Ok(user)
    }
}
