mod commands;

use clap::Parser;
use commands::{execute_command, Commands};
use hackernews_client::{ClientConfig, HackerNewsClientImpl};

/// Hacker News reader and poster
#[derive(Parser)]
#[command(
    name = "hackernews",
    about = "Read Hacker News, and submit, comment and vote as a logged-in user",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Username for actions (falls back to HN_USERNAME)
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password for actions (falls back to HN_PASSWORD)
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    let default_filter = if args.verbose {
        "hackernews_client=debug,hackernews=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let http_client = http_client::native::NativeClient::new();
    let mut client = HackerNewsClientImpl::with_config(Box::new(http_client), ClientConfig::from_env());

    match execute_command(args.command, &mut client, args.username, args.password).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
