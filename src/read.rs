use crate::gateway::HttpGateway;
use crate::{HackerNewsError, Item, Result, StoryFeed, User};

/// Stateless client for the read-only JSON API.
///
/// Reads never carry a session cookie and never touch the mutation path.
pub struct ReadClient {
    gateway: HttpGateway,
}

impl ReadClient {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    /// Fetch one item (story, comment, job, poll or poll option).
    pub async fn get_item(&self, id: u64) -> Result<Item> {
        log::debug!("Fetching item {id}");
        self.gateway
            .fetch_json::<Item>(&format!("/item/{id}.json"))
            .await?
            .ok_or_else(|| HackerNewsError::NotFound(format!("Item {id} not found")))
    }

    /// Fetch a user profile. Usernames are case-sensitive.
    pub async fn get_user(&self, username: &str) -> Result<User> {
        log::debug!("Fetching user {username}");
        self.gateway
            .fetch_json::<User>(&format!("/user/{}.json", urlencoding::encode(username)))
            .await?
            .ok_or_else(|| HackerNewsError::NotFound(format!("User \"{username}\" not found")))
    }

    /// Fetch up to `limit` story ids from a feed, in feed order.
    pub async fn get_stories(&self, feed: StoryFeed, limit: usize) -> Result<Vec<u64>> {
        log::debug!("Fetching {feed} stories (limit {limit})");
        let mut ids: Vec<u64> = self
            .gateway
            .fetch_json(&format!("/{}.json", feed.endpoint()))
            .await?
            .unwrap_or_default();
        ids.truncate(limit);
        Ok(ids)
    }
}
