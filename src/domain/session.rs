use serde::{Deserialize, Serialize};

use crate::app::{AksharError, Result};
use crate::domain::User;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Who is currently signed in. A token exists exactly when an identity does.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(flatten)]
    auth: Option<Authenticated>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Authenticated {
    token: String,
    user: User,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { auth: None }
    }

    pub fn authenticated(token: String, user: User) -> Self {
        Self {
            auth: Some(Authenticated { token, user }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(|a| a.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.auth.as_ref().map(|a| &a.user)
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user().map(|u| u.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Registration {
    /// Usernames are lower-cased with all whitespace removed.
    pub fn normalize_username(raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Normalize the username and check the fields the form requires.
    pub fn validated(mut self) -> Result<Self> {
        self.username = Self::normalize_username(&self.username);
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();

        if self.name.is_empty() || self.email.is_empty() || self.username.is_empty() {
            return Err(AksharError::Validation(
                "Name, email and username are required.".into(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AksharError::Validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        serde_json::from_str(r#"{"_id": "u1", "name": "Aarav", "username": "aarav"}"#).unwrap()
    }

    #[test]
    fn test_anonymous_has_neither_token_nor_identity() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_authenticated_has_both() {
        let session = Session::authenticated("tok".into(), user());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.user_id(), Some("u1"));
    }

    #[test]
    fn test_persisted_form_round_trips() {
        let session = Session::authenticated("tok".into(), user());
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"token\":\"tok\""));

        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_half_record_is_rejected() {
        let session: Session = serde_json::from_str(r#"{"token": "tok"}"#).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_username_normalization() {
        assert_eq!(Registration::normalize_username(" Aarav Writes "), "aaravwrites");
    }

    #[test]
    fn test_registration_rejects_short_password() {
        let reg = Registration {
            name: "Aarav".into(),
            email: "a@b.c".into(),
            username: "Aarav".into(),
            password: "12345".into(),
        };
        assert!(matches!(reg.validated(), Err(AksharError::Validation(_))));
    }

    #[test]
    fn test_registration_normalizes_on_success() {
        let reg = Registration {
            name: " Aarav ".into(),
            email: "a@b.c".into(),
            username: "Aarav Sharma".into(),
            password: "123456".into(),
        };
        let reg = reg.validated().unwrap();
        assert_eq!(reg.username, "aaravsharma");
        assert_eq!(reg.name, "Aarav");
    }
}
