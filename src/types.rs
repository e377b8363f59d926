//! Data types for Hacker News content and actions.
//!
//! This module contains the read-API records (items, users, feeds), the
//! story submission request, and the receipts returned by successful actions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ================================================================================================
// READ API RECORDS
// ================================================================================================

/// A Hacker News item: story, comment, job, poll or poll option.
///
/// Only `id` is guaranteed; every other field is omitted by the API when it
/// does not apply (for example deleted items carry little more than their id).
///
/// # Examples
///
/// ```rust
/// use hackernews_client::Item;
///
/// let item: Item = serde_json::from_str(
///     r#"{"id": 8863, "type": "story", "by": "dhouston", "title": "My YC app", "score": 104}"#,
/// ).unwrap();
///
/// assert_eq!(item.kind.as_deref(), Some("story"));
/// assert_eq!(item.score, Some(104));
/// assert!(item.kids.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The item's unique id
    pub id: u64,
    /// One of "job", "story", "comment", "poll" or "pollopt"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Username of the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
    /// Creation time, Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    /// Comment, story or poll text (HTML)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    /// Total comment count for stories and polls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descendants: Option<u64>,
    /// Ids of direct replies, in ranked display order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kids: Option<Vec<u64>>,
    /// Parent comment or story for comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    /// Poll options, for polls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<u64>>,
    /// Owning poll, for poll options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

/// A Hacker News user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The case-sensitive username
    pub id: String,
    /// Account creation time, Unix seconds
    pub created: u64,
    pub karma: i64,
    /// Self-description (HTML)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    /// Ids of the user's stories, polls and comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<Vec<u64>>,
}

/// The story feeds exposed by the read API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryFeed {
    #[default]
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl StoryFeed {
    /// All feeds, in the order the site lists them.
    pub const ALL: [StoryFeed; 6] = [
        StoryFeed::Top,
        StoryFeed::New,
        StoryFeed::Best,
        StoryFeed::Ask,
        StoryFeed::Show,
        StoryFeed::Job,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoryFeed::Top => "top",
            StoryFeed::New => "new",
            StoryFeed::Best => "best",
            StoryFeed::Ask => "ask",
            StoryFeed::Show => "show",
            StoryFeed::Job => "job",
        }
    }

    /// Name of the JSON resource that lists this feed, e.g. `topstories`.
    pub fn endpoint(&self) -> String {
        format!("{}stories", self.as_str())
    }
}

impl fmt::Display for StoryFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoryFeed {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StoryFeed::ALL
            .into_iter()
            .find(|feed| feed.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown story feed '{s}' (expected one of top, new, best, ask, show, job)")
            })
    }
}

// ================================================================================================
// MUTATION REQUESTS AND RESULTS
// ================================================================================================

/// Parameters for a story submission.
///
/// A link post carries a `url`, a text post (Ask HN) carries `text`. The client
/// does not enforce that exactly one is given: whatever is supplied is forwarded
/// and the site decides.
///
/// # Examples
///
/// ```rust
/// use hackernews_client::StorySubmission;
///
/// let link = StorySubmission::link("Show HN: a thing", "https://example.com");
/// assert_eq!(link.url.as_deref(), Some("https://example.com"));
///
/// let ask = StorySubmission::new("Ask HN: how do you test scrapers?")
///     .with_text("Curious what people use.");
/// assert!(ask.url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySubmission {
    pub title: String,
    pub url: Option<String>,
    pub text: Option<String>,
}

impl StorySubmission {
    /// A submission with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            text: None,
        }
    }

    /// A link post.
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(title).with_url(url)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Build the submission form fields around a freshly scraped `fnid` token.
    ///
    /// Empty `url` / `text` values are left out, as the site's own form does.
    pub fn form_fields<'a>(&'a self, token: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut fields = vec![
            ("fnid", token),
            ("fnop", "submit-page"),
            ("title", self.title.as_str()),
        ];
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            fields.push(("url", url));
        }
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            fields.push(("text", text));
        }
        fields
    }
}

/// The kinds of action routed through the authenticated form path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    Login,
    Submit,
    Comment,
    Upvote,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::Login => "login",
            MutationKind::Submit => "submit",
            MutationKind::Comment => "comment",
            MutationKind::Upvote => "upvote",
        };
        f.write_str(name)
    }
}

/// Confirmation of an action the client classified as successful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReceipt {
    pub action: MutationKind,
    /// The item acted upon, when the action targets one
    pub target: Option<u64>,
    /// Human-readable success message
    pub message: String,
}

impl ActionReceipt {
    pub fn new(action: MutationKind, target: Option<u64>, message: impl Into<String>) -> Self {
        Self {
            action,
            target,
            message: message.into(),
        }
    }
}

impl fmt::Display for ActionReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Authentication state of a client instance.
///
/// The only transition is `LoggedOut -> LoggedIn`, made by a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthState {
    LoggedOut,
    LoggedIn,
}
