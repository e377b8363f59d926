use clap::Subcommand;
use hackernews_client::{
    Credentials, HackerNewsClient, HackerNewsClientImpl, StoryFeed, StorySubmission,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Check that the credentials can log in
    ///
    /// Usage examples:
    /// HN_USERNAME=alice HN_PASSWORD=secret hackernews login
    Login,

    /// Show an item (story, comment, poll, job) as JSON
    ///
    /// Usage examples:
    /// hackernews item 8863
    Item {
        /// The item ID
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
    },

    /// Show a user profile as JSON
    User {
        /// The username to look up
        username: String,
    },

    /// List story IDs from a feed
    ///
    /// Usage examples:
    /// # Top 30 stories
    /// hackernews stories
    ///
    /// # First 10 Ask HN posts
    /// hackernews stories --feed ask --limit 10
    Stories {
        /// The story feed (top, new, best, ask, show, job)
        #[arg(long, default_value_t = StoryFeed::Top)]
        feed: StoryFeed,

        /// Maximum number of story IDs to return
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=500))]
        limit: u64,
    },

    /// Submit a story: a URL for a link post, or text for an Ask HN
    ///
    /// Usage examples:
    /// hackernews submit --title "Show HN: a thing" --url https://example.com
    /// hackernews submit --title "Ask HN: favourite debugger?" --text "Curious."
    Submit {
        /// Story title
        #[arg(long)]
        title: String,

        /// URL for a link post
        #[arg(long, value_parser = parse_url)]
        url: Option<String>,

        /// Body text for an Ask HN / text post
        #[arg(long)]
        text: Option<String>,
    },

    /// Comment on a story or reply to another comment
    Comment {
        /// ID of the story or comment to reply to
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        parent: u64,

        /// Comment text
        #[arg(long)]
        text: String,
    },

    /// Upvote a story or comment
    Upvote {
        /// ID of the item to upvote
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
    },
}

impl Commands {
    /// Whether the command goes through the authenticated form path
    pub fn needs_login(&self) -> bool {
        matches!(
            self,
            Commands::Login
                | Commands::Submit { .. }
                | Commands::Comment { .. }
                | Commands::Upvote { .. }
        )
    }
}

fn parse_url(value: &str) -> Result<String, String> {
    http_types::Url::parse(value)
        .map(|_| value.to_string())
        .map_err(|e| format!("invalid URL '{value}': {e}"))
}

/// Run one command, logging in first when it needs a session.
pub async fn execute_command(
    command: Commands,
    client: &mut HackerNewsClientImpl,
    username: Option<String>,
    password: Option<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    let login_receipt = if command.needs_login() {
        let credentials = Credentials::resolve(username, password)?;
        let receipt = client
            .login(&credentials.username, &credentials.password)
            .await?;
        log::info!("{receipt}");
        Some(receipt)
    } else {
        None
    };

    let output = match command {
        Commands::Login => login_receipt.map(|r| r.to_string()).unwrap_or_default(),
        Commands::Item { id } => serde_json::to_string_pretty(&client.get_item(id).await?)?,
        Commands::User { username } => {
            serde_json::to_string_pretty(&client.get_user(&username).await?)?
        }
        Commands::Stories { feed, limit } => {
            serde_json::to_string(&client.get_stories(feed, limit as usize).await?)?
        }
        Commands::Submit { title, url, text } => {
            let story = StorySubmission { title, url, text };
            client.submit_story(&story).await?.to_string()
        }
        Commands::Comment { parent, text } => client.comment(parent, &text).await?.to_string(),
        Commands::Upvote { id } => client.upvote(id).await?.to_string(),
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hackernews_client::ClientConfig;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://example.com/a?b=c").is_ok());
        assert!(parse_url("not a url").is_err());
    }

    #[test]
    fn test_needs_login() {
        assert!(Commands::Upvote { id: 1 }.needs_login());
        assert!(Commands::Login.needs_login());
        assert!(!Commands::Item { id: 1 }.needs_login());
    }

    #[test_log::test(tokio::test)]
    async fn test_login_command_reports_receipt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_string_contains("acct=alice"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", "news")
                    .insert_header("Set-Cookie", "user=alice&k3y; path=/"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig::default()
            .with_web_base_url(server.uri())
            .with_api_base_url(server.uri())
            .with_debug_save_responses(false);
        let mut client =
            HackerNewsClientImpl::with_config(Box::new(http_client::native::NativeClient::new()), config);

        let output = execute_command(
            Commands::Login,
            &mut client,
            Some("alice".to_string()),
            Some("pw".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(output, "Logged in as alice");
        assert!(client.is_logged_in());
    }
}
