use thiserror::Error;

/// Error types for Hacker News operations.
///
/// Every variant renders to a descriptive reason string that callers can surface
/// verbatim. Nothing in this crate retries: each error is terminal for the call
/// that raised it.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use hackernews_client::{HackerNewsClient, HackerNewsClientImpl, HackerNewsError};
///
/// #[tokio::main]
/// async fn main() {
///     let mut client =
///         HackerNewsClientImpl::new(Box::new(http_client::native::NativeClient::new()));
///
///     match client.login("username", "password").await {
///         Ok(receipt) => println!("{receipt}"),
///         Err(HackerNewsError::AuthenticationFailed(msg)) => eprintln!("Login rejected: {msg}"),
///         Err(HackerNewsError::Http(msg)) => eprintln!("Network error: {msg}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum HackerNewsError {
    /// A mutating operation was invoked without an active session.
    ///
    /// No network request is made when this is returned.
    #[error("Not logged in - call login first")]
    NotAuthenticated,

    /// The credential exchange was rejected or produced no recognizable
    /// `user=` session cookie.
    #[error("Login failed: {0}")]
    AuthenticationFailed(String),

    /// The expected hidden form control was absent or empty.
    ///
    /// This typically indicates that the page layout changed, the page was served
    /// to an unauthenticated session, or the site returned a block page. These
    /// cases cannot be told apart from the HTML alone.
    #[error("Could not extract {field} token from page")]
    TokenNotFound {
        /// Name attribute of the form control that was searched for
        field: String,
    },

    /// A page or API fetch returned a non-success status.
    #[error("Request to {url} failed with status {status}")]
    Transport {
        /// The URL that was requested
        url: String,
        /// The HTTP status code received
        status: u16,
    },

    /// Connection-level failure reported by the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Story submission reached the server but was classified as rejected.
    #[error("Submit failed: {0}")]
    SubmissionRejected(String),

    /// Comment submission reached the server but was classified as rejected.
    #[error("Comment on item {parent_id} failed: {reason}")]
    CommentRejected {
        /// The item that was being replied to
        parent_id: u64,
        /// Why the response was classified as a rejection
        reason: String,
    },

    /// The vote link was followed but the server answered with an error status.
    #[error("Upvote of item {item_id} failed: {reason}")]
    VoteFailed {
        /// The item that was being voted on
        item_id: u64,
        /// Why the response was classified as a failure
        reason: String,
    },

    /// The item page carried no vote link for the item.
    ///
    /// Usually the session already voted, the item is not eligible, or it is
    /// the caller's own submission.
    #[error("Cannot upvote item {item_id} - vote link not found (already voted or not eligible)")]
    VoteUnavailable {
        /// The item that was being voted on
        item_id: u64,
    },

    /// The read API answered `null` for the requested resource.
    #[error("{0}")]
    NotFound(String),

    /// Failed to decode a response or build a selector.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Username or password could not be assembled from arguments or environment.
    #[error("Username and password required. Pass them as arguments or set HN_USERNAME/HN_PASSWORD")]
    MissingCredentials,

    /// File system I/O errors, e.g. while saving debug responses.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        let err = HackerNewsError::TokenNotFound {
            field: "fnid".to_string(),
        };
        assert_eq!(err.to_string(), "Could not extract fnid token from page");

        let err = HackerNewsError::Transport {
            url: "https://news.ycombinator.com/submit".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Request to https://news.ycombinator.com/submit failed with status 503"
        );

        let err = HackerNewsError::VoteUnavailable { item_id: 123 };
        assert!(err.to_string().contains("item 123"));
    }
}
