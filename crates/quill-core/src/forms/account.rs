use serde::{Deserialize, Serialize};

use super::errors::FormErrors;
use super::fields::{REQUIRED, max_chars, required};
use super::{PASSWORD_MIN_CHARS, USERNAME_MAX_CHARS};

pub(crate) const INVALID_LOGIN: &str = "Please enter a correct username and password.";
pub(crate) const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
}

/// Submission for creating an account: username plus a confirmed password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password1: String,
    #[serde(default, skip_serializing)]
    pub password2: String,
}

fn valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

impl RegistrationForm {
    /// Local checks only; username uniqueness is checked against the store.
    pub fn validate(&self) -> Result<NewAccount, FormErrors> {
        let mut errors = FormErrors::new();

        let username = required(&mut errors, "username", &self.username)
            .filter(|u| max_chars(&mut errors, "username", u, USERNAME_MAX_CHARS))
            .filter(|u| {
                let ok = valid_username(u);
                if !ok {
                    errors.add(
                        "username",
                        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                    );
                }
                ok
            });

        // Passwords are never trimmed.
        if self.password1.is_empty() {
            errors.add("password1", REQUIRED);
        }
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        }
        if !self.password1.is_empty() && !self.password2.is_empty() {
            if self.password1 != self.password2 {
                errors.add("password2", "The two password fields didn\u{2019}t match.");
            } else {
                if self.password2.chars().count() < PASSWORD_MIN_CHARS {
                    errors.add(
                        "password2",
                        format!(
                            "This password is too short. It must contain at least {PASSWORD_MIN_CHARS} characters."
                        ),
                    );
                }
                if self.password2.chars().all(|c| c.is_ascii_digit()) {
                    errors.add("password2", "This password is entirely numeric.");
                }
            }
        }

        match username {
            Some(username) => errors.finish(NewAccount {
                username,
                password: self.password1.clone(),
            }),
            None => Err(errors),
        }
    }
}

/// Submission for signing in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(String, String), FormErrors> {
        let mut errors = FormErrors::new();
        let username = required(&mut errors, "username", &self.username);
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        match username {
            Some(username) => errors.finish((username, self.password.clone())),
            None => Err(errors),
        }
    }

    /// Errors for a well-formed submission whose credentials did not match.
    pub fn invalid_credentials() -> FormErrors {
        let mut errors = FormErrors::new();
        errors.add_non_field(INVALID_LOGIN);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, p1: &str, p2: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_string(),
            password1: p1.to_string(),
            password2: p2.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        let account = form("new.user", "testpass123", "testpass123").validate().unwrap();
        assert_eq!(account.username, "new.user");
        assert_eq!(account.password, "testpass123");
    }

    #[test]
    fn test_password_mismatch() {
        let errors = form("newuser", "testpass123", "testpass124").validate().unwrap_err();
        assert!(errors.has("password2"));
    }

    #[test]
    fn test_weak_passwords() {
        assert!(form("newuser", "short1", "short1").validate().unwrap_err().has("password2"));
        assert!(form("newuser", "12345678901", "12345678901").validate().is_err());
    }

    #[test]
    fn test_invalid_username() {
        let errors = form("bad name!", "testpass123", "testpass123").validate().unwrap_err();
        assert!(errors.has("username"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert!(errors.has("username"));
        assert!(errors.has("password"));
    }
}
