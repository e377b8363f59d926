//! Outcome classification for responses that carry no structured result.
//!
//! The site answers form posts with a redirect, an HTML page, or nothing at all.
//! These functions turn such a response into a binary outcome with a reason.
//! Anything without an explicit positive signal is classified as a failure.

use crate::gateway::GatewayResponse;
use crate::session::extract_session_cookie;
use crate::Result;

/// Success or failure of one action, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Succeeded(String),
    Failed(String),
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Succeeded(_))
    }

    pub fn reason(&self) -> &str {
        match self {
            MutationOutcome::Succeeded(reason) | MutationOutcome::Failed(reason) => reason,
        }
    }
}

/// Result of a login exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The `user=...` credential to store
    Authenticated(String),
    Rejected(String),
}

/// Classify the response to a login form post.
///
/// Success needs a `Set-Cookie` carrying a non-empty `user=` value; the status
/// and body play no part beyond enriching the failure reason.
pub fn classify_login(response: &GatewayResponse) -> Result<LoginOutcome> {
    if let Some(credential) = extract_session_cookie(&response.set_cookies)? {
        return Ok(LoginOutcome::Authenticated(credential));
    }

    let reason = if response.body.contains("Bad login") {
        "Bad login - invalid credentials".to_string()
    } else if response.set_cookies.is_empty() {
        "invalid credentials or unexpected response (no session cookie set)".to_string()
    } else {
        "could not extract user cookie from response".to_string()
    };
    Ok(LoginOutcome::Rejected(reason))
}

/// Classify the response to a submit or comment form post.
///
/// In order: a body containing any of `rejection_markers` fails; a redirect
/// to the login page fails (the session was not accepted); any other
/// redirect or a 2xx succeeds; everything else fails.
pub fn classify_form_post(response: &GatewayResponse, rejection_markers: &[String]) -> MutationOutcome {
    if let Some(marker) = rejection_markers
        .iter()
        .find(|marker| !marker.is_empty() && response.body.contains(marker.as_str()))
    {
        return MutationOutcome::Failed(format!(
            "server returned an error page (matched \"{marker}\")"
        ));
    }

    if response.is_redirect() {
        return match response.location.as_deref() {
            Some(location) if points_to_login(location) => MutationOutcome::Failed(format!(
                "redirected to {location} - session was not accepted"
            )),
            Some(location) => MutationOutcome::Succeeded(format!("redirected to {location}")),
            None => MutationOutcome::Succeeded(format!("redirect ({})", response.status)),
        };
    }

    if response.is_success() {
        return MutationOutcome::Succeeded(format!("status {}", response.status));
    }

    MutationOutcome::Failed(format!("unexpected status {}", response.status))
}

/// Classify the response to following a vote link.
///
/// The site does not otherwise confirm votes, so any status below 400 counts.
pub fn classify_vote(status: u16) -> MutationOutcome {
    if status >= 400 {
        MutationOutcome::Failed(format!("vote request failed with status {status}"))
    } else {
        MutationOutcome::Succeeded(format!("status {status}"))
    }
}

fn points_to_login(location: &str) -> bool {
    let path = location
        .split_once("://")
        .and_then(|(_, rest)| rest.split_once('/').map(|(_, path)| path))
        .unwrap_or(location)
        .trim_start_matches('/');
    path == "login" || path.starts_with("login?")
}
