use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use issuedeck_core::matching::{match_score, rank_issues};
use issuedeck_core::models::UserProfile;
use issuedeck_core::providers::GitHubSearcher;
use issuedeck_core::{Config, FeedParams, FeedService};

#[derive(Parser)]
#[command(name = "issuedeck")]
#[command(version, about = "Ranked, swipeable queue of open source issues", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch one page of the issue feed
    Feed {
        /// Programming language filter (e.g. rust, python)
        #[arg(long)]
        language: Option<String>,

        /// Only issues labeled good-first-issue
        #[arg(long)]
        good_first_only: bool,

        /// Page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Profile TOML; when given, results are ranked by match score
        #[arg(long)]
        profile: Option<std::path::PathBuf>,

        /// GitHub token (falls back to config, then anonymous)
        #[arg(long, env = "GITHUB_TOKEN")]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "issuedeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Feed {
            language,
            good_first_only,
            page,
            profile,
            token,
        }) => {
            tracing::info!("Fetching feed page {}", page);

            let config = Config::load()?;
            let token = token.or_else(|| config.github.token.clone());

            let searcher = GitHubSearcher::with_base_url(token, config.github.api_url.clone());
            let service = FeedService::with_page_size(Box::new(searcher), config.feed.page_size);

            let params = FeedParams {
                language,
                good_first_only: good_first_only.then(|| "true".to_string()),
                page: Some(page),
            };

            let response = service.issues(&params).await?;

            let profile: Option<UserProfile> = match profile {
                Some(path) => Some(toml::from_str(&std::fs::read_to_string(path)?)?),
                None => None,
            };

            let mut issues = response.issues;
            if let Some(user) = &profile {
                issues = rank_issues(issues, user);
            }

            for issue in &issues {
                match &profile {
                    Some(user) => println!(
                        "[{:>3}] {:<40} #{:<6} {}",
                        match_score(issue, user),
                        issue.repo_name,
                        issue.number,
                        issue.title
                    ),
                    None => println!(
                        "{:<40} #{:<6} {}",
                        issue.repo_name, issue.number, issue.title
                    ),
                }
            }

            if response.has_more {
                println!("-- more available, try --page {}", page + 1);
            }
        }
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}
