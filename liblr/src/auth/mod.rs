//! Authentication handling for registry requests.
//!
//! The registry API is called with HTTP Basic authentication only, so this
//! module is limited to holding a username/password pair and rendering the
//! `Authorization` header for it.

use base64::{Engine as _, engine::general_purpose};
use std::fmt;


/// HTTP Basic credentials for registry authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username for authentication
    username: String,
    /// Password for authentication
    password: String,
}

impl Credentials {
    /// Creates Basic authentication credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use liblr::auth::Credentials;
    ///
    /// let creds = Credentials::basic("username", "password");
    /// assert_eq!(creds.username(), "username");
    /// ```
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the Authorization header value for these credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use liblr::auth::Credentials;
    ///
    /// let creds = Credentials::basic("u", "p");
    /// assert_eq!(creds.to_header_value(), "Basic dTpw");
    /// ```
    pub fn to_header_value(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        let encoded = general_purpose::STANDARD.encode(credentials);
        format!("Basic {}", encoded)
    }
}

// Passwords must never leak through {:?} in verbose output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
