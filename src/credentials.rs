//! Credentials for the TFVC web API.
//!
//! The service accepts a personal access token sent as HTTP basic
//! authentication with an empty user name, or explicit basic credentials.
//! Collections that allow unauthenticated reads can be used anonymously.

use std::fmt;

use reqwest::RequestBuilder;

/// Credentials applied to every outbound request.
#[derive(Clone)]
pub enum Credentials {
    /// Personal access token.
    Pat(String),
    /// Explicit basic credentials.
    Basic { username: String, password: String },
    /// No credentials.
    Anonymous,
}

impl Credentials {
    /// Personal access token credentials.
    pub fn pat(token: impl Into<String>) -> Self {
        Self::Pat(token.into())
    }

    /// Basic credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// No credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    /// Apply these credentials to an outbound request.
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Pat(token) => request.basic_auth("", Some(token)),
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Anonymous => request,
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pat(_) => f.write_str("Credentials::Pat(***)"),
            Self::Basic { username, .. } => {
                write!(f, "Credentials::Basic {{ username: {username:?}, password: *** }}")
            }
            Self::Anonymous => f.write_str("Credentials::Anonymous"),
        }
    }
}
