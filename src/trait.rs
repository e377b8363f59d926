use crate::{ActionReceipt, AuthState, Item, Result, StoryFeed, StorySubmission, User};
use async_trait::async_trait;

/// Trait for Hacker News client operations that can be mocked for testing.
///
/// This covers the read API and the authenticated actions, so code built on top
/// of the client can be tested without a network.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockHackerNewsClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait HackerNewsClient {
    /// Authenticate with a username and password, storing the session cookie.
    async fn login(&mut self, username: &str, password: &str) -> Result<ActionReceipt>;

    /// Current authentication state.
    fn auth_state(&self) -> AuthState;

    /// Check if the client currently holds a session.
    fn is_logged_in(&self) -> bool {
        self.auth_state() == AuthState::LoggedIn
    }

    /// The held session credential (`user=...`), if any.
    fn session_credential(&self) -> Option<String>;

    /// Fetch an item from the read API.
    async fn get_item(&self, id: u64) -> Result<Item>;

    /// Fetch a user profile from the read API.
    async fn get_user(&self, username: &str) -> Result<User>;

    /// Fetch up to `limit` story ids from a feed.
    async fn get_stories(&self, feed: StoryFeed, limit: usize) -> Result<Vec<u64>>;

    /// Submit a story. Requires a session.
    async fn submit_story(&mut self, story: &StorySubmission) -> Result<ActionReceipt>;

    /// Comment on an item. Requires a session.
    async fn comment(&mut self, parent_id: u64, text: &str) -> Result<ActionReceipt>;

    /// Upvote an item. Requires a session.
    async fn upvote(&mut self, item_id: u64) -> Result<ActionReceipt>;
}
