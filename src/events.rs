//! # Client Events
//!
//! This module provides a broadcast channel system for emitting request and
//! mutation events that consumers can listen to, alongside a watch slot that
//! always holds the most recent event.

use crate::types::MutationKind;
use http_types::Url;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

/// Query parameters whose values are one-time secrets and never leave the client.
const REDACTED_PARAMS: &[&str] = &["auth", "hmac"];

/// Request information for client events
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestInfo {
    /// The HTTP method (GET, POST)
    pub method: String,
    /// The full URI being requested, with secret query values redacted
    pub uri: String,
    /// Query parameters as key-value pairs
    pub query_params: Vec<(String, String)>,
    /// Path without query parameters
    pub path: String,
}

impl RequestInfo {
    /// Create RequestInfo from a parsed URL and method
    pub fn from_url_and_method(url: &Url, method: &str) -> Self {
        let query_params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if REDACTED_PARAMS.contains(&&*key) {
                    "<redacted>".to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();

        let mut redacted = url.clone();
        if !query_params.is_empty() {
            redacted
                .query_pairs_mut()
                .clear()
                .extend_pairs(query_params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Self {
            method: method.to_string(),
            uri: redacted.to_string(),
            query_params,
            path: url.path().to_string(),
        }
    }

    /// Get a short description of the request for logging
    pub fn short_description(&self) -> String {
        let mut desc = format!("{} {}", self.method, self.path);
        if let Some((key, value)) = self.query_params.first() {
            desc.push_str(&format!("?{key}={value}"));
            if self.query_params.len() > 1 {
                desc.push_str("...");
            }
        }
        desc
    }
}

/// Event type to describe internal client activity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// Request started
    RequestStarted {
        /// Request details
        request: RequestInfo,
    },
    /// Request completed with a response (any status)
    RequestCompleted {
        /// Request details
        request: RequestInfo,
        /// HTTP status code
        status_code: u16,
        /// Duration of the request in milliseconds
        duration_ms: u64,
    },
    /// A session cookie was obtained
    LoggedIn {
        username: String,
    },
    /// A submit, comment or upvote finished, successfully or not
    MutationAttempted {
        action: MutationKind,
        /// Item acted upon, if any
        target: Option<u64>,
        success: bool,
        /// Failure reason when `success` is false
        error_message: Option<String>,
        /// Duration of the whole action in milliseconds
        duration_ms: u64,
    },
}

/// Type alias for the broadcast receiver
pub type ClientEventReceiver = broadcast::Receiver<ClientEvent>;

/// Shared event broadcasting state, handed to every component of one client
#[derive(Clone)]
pub struct SharedEventBroadcaster {
    event_tx: broadcast::Sender<ClientEvent>,
    last_event_tx: watch::Sender<Option<ClientEvent>>,
}

impl SharedEventBroadcaster {
    /// Create a new shared event broadcaster
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (last_event_tx, _) = watch::channel(None);

        Self {
            event_tx,
            last_event_tx,
        }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast_event(&self, event: ClientEvent) {
        let _ = self.event_tx.send(event.clone());
        self.last_event_tx.send_replace(Some(event));
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.event_tx.subscribe()
    }

    /// Get the latest event
    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.last_event_tx.borrow().clone()
    }
}

impl Default for SharedEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedEventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEventBroadcaster")
            .field("subscribers", &self.event_tx.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_info_redacts_vote_auth() {
        let url = Url::parse(
            "https://news.ycombinator.com/vote?id=123&how=up&auth=a1b2c3&goto=item%3Fid%3D123",
        )
        .unwrap();
        let info = RequestInfo::from_url_and_method(&url, "GET");

        assert_eq!(info.path, "/vote");
        assert!(!info.uri.contains("a1b2c3"));
        assert!(info
            .query_params
            .contains(&("auth".to_string(), "<redacted>".to_string())));
        assert!(info
            .query_params
            .contains(&("goto".to_string(), "item?id=123".to_string())));
        assert_eq!(info.short_description(), "GET /vote?id=123...");
    }

    #[test]
    fn test_request_info_without_query() {
        let url = Url::parse("https://news.ycombinator.com/submit").unwrap();
        let info = RequestInfo::from_url_and_method(&url, "GET");
        assert_eq!(info.uri, "https://news.ycombinator.com/submit");
        assert!(info.query_params.is_empty());
        assert_eq!(info.short_description(), "GET /submit");
    }

    #[test]
    fn test_latest_event_without_subscribers() {
        let broadcaster = SharedEventBroadcaster::new();
        assert!(broadcaster.latest_event().is_none());

        broadcaster.broadcast_event(ClientEvent::LoggedIn {
            username: "alice".to_string(),
        });
        assert_eq!(
            broadcaster.latest_event(),
            Some(ClientEvent::LoggedIn {
                username: "alice".to_string()
            })
        );
    }
}
