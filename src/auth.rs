//! Login collaborator. There is no real access control: a successful login only
//! produces the [`Session`] the dashboard is built with.

use serde::Serialize;

use crate::error::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub email: String,
    /// Display name, the part of the email before `@`.
    pub name: String,
}

impl Session {
    pub fn new(email: &str) -> Self {
        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            name,
        }
    }
}

pub trait Authenticator {
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;
}

/// Accepts any non-empty email and password.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAny;

impl Authenticator for AcceptAny {
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Session::new(email))
    }
}

/// Accepts exactly one configured email/password pair.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    email: String,
    password: String,
}

impl FixedCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Authenticator for FixedCredentials {
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.trim() == self.email && password == self.password {
            Ok(Session::new(email))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl<A: Authenticator + ?Sized> Authenticator for Box<A> {
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        (**self).login(email, password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_any_requires_both_fields() {
        assert!(AcceptAny.login("", "secret").is_err());
        assert!(AcceptAny.login("ali@des.com", "").is_err());
        let session = AcceptAny.login("ali@des.com", "x").unwrap();
        assert_eq!(session.name, "ali");
    }

    #[test]
    fn fixed_credentials_match_exactly() {
        let auth = FixedCredentials::new("admin@des.com", "admin123");
        assert_eq!(auth.login("admin@des.com", "admin123").unwrap().email, "admin@des.com");
        assert_eq!(auth.login("admin@des.com", "Admin123"), Err(AuthError::InvalidCredentials));
        assert_eq!(auth.login("other@des.com", "admin123"), Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn session_name_without_at_sign_is_whole_email() {
        assert_eq!(Session::new("foreman").name, "foreman");
    }
}
