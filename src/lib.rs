//! Read Hacker News through its JSON API, and post, comment and vote through
//! its web forms.
//!
//! Reads are stateless. Actions need a session obtained with
//! [`HackerNewsClient::login`], and each one scrapes a fresh per-page token
//! before submitting. The site answers actions with redirects or HTML rather
//! than structured results, so success is inferred by [`outcome`].

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod gateway;
pub mod headers;
pub mod mutation;
pub mod outcome;
pub mod parsing;
pub mod read;
pub mod session;
pub mod r#trait;
pub mod types;

pub use client::HackerNewsClientImpl;
pub use config::{ClientConfig, Credentials};
pub use error::HackerNewsError;
pub use events::{ClientEvent, ClientEventReceiver, RequestInfo, SharedEventBroadcaster};
pub use gateway::{GatewayResponse, HttpGateway};
pub use mutation::MutationClient;
pub use outcome::{LoginOutcome, MutationOutcome};
pub use read::ReadClient;
pub use session::SessionStore;
pub use r#trait::HackerNewsClient;
#[cfg(feature = "mock")]
pub use r#trait::MockHackerNewsClient;
pub use types::{
    ActionReceipt, AuthState, Item, MutationKind, StoryFeed, StorySubmission, User,
};

pub type Result<T> = std::result::Result<T, HackerNewsError>;
