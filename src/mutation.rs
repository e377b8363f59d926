use crate::events::ClientEvent;
use crate::gateway::HttpGateway;
use crate::outcome::{classify_form_post, classify_login, classify_vote, LoginOutcome, MutationOutcome};
use crate::parsing::{extract_token, find_vote_link, TOKEN_FIELD};
use crate::{
    ActionReceipt, AuthState, HackerNewsError, MutationKind, Result, SessionStore,
    SharedEventBroadcaster, StorySubmission,
};
use std::sync::Arc;
use std::time::Instant;

/// Client for the authenticated, form-based actions of the site.
///
/// Every action follows the same protocol: check that a session is held, fetch
/// the page the action lives on, scrape its `fnid` token (or vote link), submit,
/// and classify the response. Tokens are never cached between actions; each one
/// is scraped from a fresh fetch of its own page.
///
/// Mutating methods take `&mut self`, so one instance runs at most one action
/// at a time. Use one instance per concurrent session.
pub struct MutationClient {
    gateway: HttpGateway,
    broadcaster: Arc<SharedEventBroadcaster>,
    rejection_markers: Vec<String>,
}

impl MutationClient {
    pub fn new(
        gateway: HttpGateway,
        broadcaster: Arc<SharedEventBroadcaster>,
        rejection_markers: Vec<String>,
    ) -> Self {
        Self {
            gateway,
            broadcaster,
            rejection_markers,
        }
    }

    pub fn state(&self) -> AuthState {
        if self.gateway.session().is_active() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.gateway.session()
    }

    /// Exchange a username and password for a session cookie.
    ///
    /// On success the `user=...` cookie is stored and the client is
    /// [`AuthState::LoggedIn`]. A failed attempt leaves any existing state untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<ActionReceipt> {
        log::debug!("Logging in as {username}");

        let form = [("acct", username), ("pw", password), ("goto", "news")];
        let response = self.gateway.post("/login", &form, "/login").await?;
        log::debug!("Login response status: {}", response.status);

        match classify_login(&response)? {
            LoginOutcome::Authenticated(credential) => {
                self.gateway.session_mut().set(credential)?;
                log::debug!("Login successful - authenticated session established");
                self.broadcaster.broadcast_event(ClientEvent::LoggedIn {
                    username: username.to_string(),
                });
                Ok(ActionReceipt::new(
                    MutationKind::Login,
                    None,
                    format!("Logged in as {username}"),
                ))
            }
            LoginOutcome::Rejected(reason) => {
                log::debug!("Login rejected: {reason}");
                Err(HackerNewsError::AuthenticationFailed(reason))
            }
        }
    }

    /// Submit a link or text story.
    pub async fn submit_story(&mut self, story: &StorySubmission) -> Result<ActionReceipt> {
        self.require_session()?;
        let started = Instant::now();

        let result = self.submit_story_impl(story).await;
        self.report(MutationKind::Submit, None, started, &result);
        result
    }

    async fn submit_story_impl(&self, story: &StorySubmission) -> Result<ActionReceipt> {
        log::debug!("Getting fresh {TOKEN_FIELD} token for submission");
        let page = self.gateway.get("/submit").await?;
        let token = extract_token(&page, TOKEN_FIELD)?;

        log::debug!("Submitting story '{}'", story.title);
        let response = self
            .gateway
            .post("/r", &story.form_fields(&token), "/submit")
            .await?;

        match classify_form_post(&response, &self.rejection_markers) {
            MutationOutcome::Succeeded(reason) => {
                log::debug!("Submission accepted: {reason}");
                Ok(ActionReceipt::new(
                    MutationKind::Submit,
                    None,
                    "Story submitted successfully",
                ))
            }
            MutationOutcome::Failed(reason) => Err(HackerNewsError::SubmissionRejected(reason)),
        }
    }

    /// Post a comment on a story, or reply to a comment.
    pub async fn comment(&mut self, parent_id: u64, text: &str) -> Result<ActionReceipt> {
        self.require_session()?;
        let started = Instant::now();

        let result = self.comment_impl(parent_id, text).await;
        self.report(MutationKind::Comment, Some(parent_id), started, &result);
        result
    }

    async fn comment_impl(&self, parent_id: u64, text: &str) -> Result<ActionReceipt> {
        let item_path = format!("/item?id={parent_id}");

        // The item page doubles as the existence check and the token source
        let page = self.gateway.get(&item_path).await?;
        let token = extract_token(&page, TOKEN_FIELD)?;

        let parent = parent_id.to_string();
        let form = [
            ("parent", parent.as_str()),
            ("text", text),
            (TOKEN_FIELD, token.as_str()),
        ];
        let response = self.gateway.post("/comment", &form, &item_path).await?;

        match classify_form_post(&response, &self.rejection_markers) {
            MutationOutcome::Succeeded(reason) => {
                log::debug!("Comment accepted: {reason}");
                Ok(ActionReceipt::new(
                    MutationKind::Comment,
                    Some(parent_id),
                    format!("Comment posted on item {parent_id}"),
                ))
            }
            MutationOutcome::Failed(reason) => {
                Err(HackerNewsError::CommentRejected { parent_id, reason })
            }
        }
    }

    /// Upvote a story or comment by following its one-time vote link.
    pub async fn upvote(&mut self, item_id: u64) -> Result<ActionReceipt> {
        self.require_session()?;
        let started = Instant::now();

        let result = self.upvote_impl(item_id).await;
        self.report(MutationKind::Upvote, Some(item_id), started, &result);
        result
    }

    async fn upvote_impl(&self, item_id: u64) -> Result<ActionReceipt> {
        let item_path = format!("/item?id={item_id}");
        let page = self.gateway.get(&item_path).await?;

        let Some(vote_link) = find_vote_link(&page, item_id)? else {
            log::debug!("No up_{item_id} link on item page");
            return Err(HackerNewsError::VoteUnavailable { item_id });
        };

        let response = self.gateway.follow(&vote_link, &item_path).await?;

        match classify_vote(response.status) {
            MutationOutcome::Succeeded(reason) => {
                log::debug!("Vote accepted: {reason}");
                Ok(ActionReceipt::new(
                    MutationKind::Upvote,
                    Some(item_id),
                    format!("Upvoted item {item_id}"),
                ))
            }
            MutationOutcome::Failed(reason) => Err(HackerNewsError::VoteFailed { item_id, reason }),
        }
    }

    fn require_session(&self) -> Result<()> {
        match self.state() {
            AuthState::LoggedIn => Ok(()),
            AuthState::LoggedOut => Err(HackerNewsError::NotAuthenticated),
        }
    }

    fn report(
        &self,
        action: MutationKind,
        target: Option<u64>,
        started: Instant,
        result: &Result<ActionReceipt>,
    ) {
        match result {
            Ok(receipt) => log::info!("{receipt}"),
            Err(e) => log::debug!("{action} failed: {e}"),
        }

        self.broadcaster.broadcast_event(ClientEvent::MutationAttempted {
            action,
            target,
            success: result.is_ok(),
            error_message: result.as_ref().err().map(|e| e.to_string()),
            duration_ms: started.elapsed().as_millis() as u64,
        });
    }
}
