//! Basic authentication header computation.

use std::fmt;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::error::{Error, Result};

/// Username/password pair for HTTP Basic authentication.
///
/// The header is only computed at emission, so the encoding (UTF-8, then
/// standard base64) lives in one place.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str { &self.username }

    /// `Basic <base64(user:pass)>`.
    ///
    /// Fails if the user-id contains a colon or either part contains a
    /// control character, since neither survives the round trip.
    pub fn header_value(&self) -> Result<String> {
        if self.username.contains(':') {
            return Err(Error::AuthEncoding(
                "user-id must not contain ':'".to_string(),
            ));
        }
        if self
            .username
            .chars()
            .chain(self.password.chars())
            .any(char::is_control)
        {
            return Err(Error::AuthEncoding(
                "credentials must not contain control characters".to_string(),
            ));
        }

        let token = BASE64_STANDARD.encode(format!("{}:{}", self.username, self.password));
        Ok(format!("Basic {token}"))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
