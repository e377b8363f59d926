use crate::{HackerNewsError, Result};
use regex::Regex;

/// Holder for at most one session credential.
///
/// The credential is the opaque `user=...` cookie the site issues on login. It
/// lives only in memory for as long as the owning client does and is never
/// written anywhere. Each client instance owns its own store, so independent
/// sessions can coexist as separate clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStore {
    credential: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a credential, replacing any previous one.
    ///
    /// The only validation is that the credential is non-empty.
    pub fn set(&mut self, credential: impl Into<String>) -> Result<()> {
        let credential = credential.into();
        if credential.trim().is_empty() {
            return Err(HackerNewsError::AuthenticationFailed(
                "empty session credential".to_string(),
            ));
        }
        self.credential = Some(credential);
        Ok(())
    }

    pub fn get(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn clear(&mut self) {
        self.credential = None;
    }

    pub fn is_active(&self) -> bool {
        self.credential.is_some()
    }
}

/// Find the session cookie among `Set-Cookie` header values.
///
/// Returns the `user=<value>` pair verbatim, without attributes such as
/// `path` or `expires`. A `user=` cookie with an empty value (as sent on
/// logout) does not count, and neither does `user=` inside another cookie's
/// name or value.
pub fn extract_session_cookie<S: AsRef<str>>(set_cookie_headers: &[S]) -> Result<Option<String>> {
    let pattern = Regex::new(r"(?:^|[;,])\s*user=([^;,\s]+)")
        .map_err(|e| HackerNewsError::Parse(e.to_string()))?;

    for header in set_cookie_headers {
        if let Some(captures) = pattern.captures(header.as_ref()) {
            if let Some(value) = captures.get(1) {
                log::trace!("Found session cookie in Set-Cookie header");
                return Ok(Some(format!("user={}", value.as_str())));
            }
        }
    }

    Ok(None)
}
