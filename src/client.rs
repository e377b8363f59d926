use crate::events::{ClientEvent, ClientEventReceiver, SharedEventBroadcaster};
use crate::gateway::HttpGateway;
use crate::mutation::MutationClient;
use crate::read::ReadClient;
use crate::{
    ActionReceipt, AuthState, ClientConfig, HackerNewsClient, Item, Result, StoryFeed,
    StorySubmission, User,
};
use async_trait::async_trait;
use http_client::HttpClient;
use std::sync::Arc;

/// Main client for Hacker News.
///
/// Combines a [`ReadClient`] for the JSON API with a [`MutationClient`] for the
/// authenticated web forms. Both share one HTTP client and one event broadcaster;
/// only the mutation side ever holds a session.
///
/// # Examples
///
/// ```rust,no_run
/// use hackernews_client::{HackerNewsClient, HackerNewsClientImpl, Result, StorySubmission};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let mut client = HackerNewsClientImpl::new(Box::new(http_client));
///
///     let top = client.get_stories(Default::default(), 5).await?;
///     println!("Top stories: {top:?}");
///
///     client.login("username", "password").await?;
///     assert!(client.is_logged_in());
///
///     let story = StorySubmission::link("Show HN: a thing", "https://example.com");
///     let receipt = client.submit_story(&story).await?;
///     println!("{receipt}");
///
///     Ok(())
/// }
/// ```
pub struct HackerNewsClientImpl {
    reader: ReadClient,
    writer: MutationClient,
    broadcaster: Arc<SharedEventBroadcaster>,
}

impl HackerNewsClientImpl {
    /// Create a client for the public site with default configuration.
    pub fn new(client: Box<dyn HttpClient + Send + Sync>) -> Self {
        Self::with_config(client, ClientConfig::default())
    }

    /// Create a client with custom configuration, e.g. other base URLs for testing.
    pub fn with_config(client: Box<dyn HttpClient + Send + Sync>, config: ClientConfig) -> Self {
        let client: Arc<dyn HttpClient + Send + Sync> = Arc::from(client);
        let broadcaster = Arc::new(SharedEventBroadcaster::new());

        let read_gateway =
            HttpGateway::new(client.clone(), &config.api_base_url, broadcaster.clone())
                .with_debug_save_responses(config.debug_save_responses);
        let web_gateway = HttpGateway::new(client, &config.web_base_url, broadcaster.clone())
            .with_debug_save_responses(config.debug_save_responses);

        Self {
            reader: ReadClient::new(read_gateway),
            writer: MutationClient::new(web_gateway, broadcaster.clone(), config.rejection_markers),
            broadcaster,
        }
    }

    /// Create a client and log in with it in one step.
    pub async fn login_with_credentials(
        client: Box<dyn HttpClient + Send + Sync>,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let mut new_client = Self::new(client);
        new_client.login(username, password).await?;
        Ok(new_client)
    }

    /// Subscribe to request and mutation events.
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.broadcaster.subscribe()
    }

    /// The most recent event, if any was broadcast.
    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.broadcaster.latest_event()
    }

    pub fn reader(&self) -> &ReadClient {
        &self.reader
    }

    pub fn writer(&self) -> &MutationClient {
        &self.writer
    }
}

#[async_trait(?Send)]
impl HackerNewsClient for HackerNewsClientImpl {
    async fn login(&mut self, username: &str, password: &str) -> Result<ActionReceipt> {
        self.writer.login(username, password).await
    }

    fn auth_state(&self) -> AuthState {
        self.writer.state()
    }

    fn session_credential(&self) -> Option<String> {
        self.writer.session().get().map(str::to_string)
    }

    async fn get_item(&self, id: u64) -> Result<Item> {
        self.reader.get_item(id).await
    }

    async fn get_user(&self, username: &str) -> Result<User> {
        self.reader.get_user(username).await
    }

    async fn get_stories(&self, feed: StoryFeed, limit: usize) -> Result<Vec<u64>> {
        self.reader.get_stories(feed, limit).await
    }

    async fn submit_story(&mut self, story: &StorySubmission) -> Result<ActionReceipt> {
        self.writer.submit_story(story).await
    }

    async fn comment(&mut self, parent_id: u64, text: &str) -> Result<ActionReceipt> {
        self.writer.comment(parent_id, text).await
    }

    async fn upvote(&mut self, item_id: u64) -> Result<ActionReceipt> {
        self.writer.upvote(item_id).await
    }
}
