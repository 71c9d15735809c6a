//! The fixed username/password pair.

use crate::config::AuthConfig;
use crate::error::FlaskrError;

/// The single accepted credential pair.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks a login attempt. The username is checked first, so a wrong
    /// username is reported even when the password is wrong too.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::InvalidUsername`] or
    /// [`FlaskrError::InvalidPassword`].
    pub fn verify(&self, username: &str, password: &str) -> Result<(), FlaskrError> {
        if username != self.username {
            return Err(FlaskrError::InvalidUsername);
        }
        if password != self.password {
            return Err(FlaskrError::InvalidPassword);
        }
        Ok(())
    }
}

impl From<&AuthConfig> for Credentials {
    fn from(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}
