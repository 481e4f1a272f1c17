//! Chainblog CLI
//!
//! Drives the feed, notification and voter loaders against a live feed
//! service and chain indexer, and prints what a UI would render:
//! - News feed with post previews
//! - Notifications
//! - Voters of a post, a comment or a list of reactions

use anyhow::Context;
use chainblog::{
    AccountId, ClassifyOutcome, CommentId, Config, FeedKind, FeedLoader, FeedService, HttpChainQuery,
    HttpFeedService, Mount, NewsItem, NewsResolver, NotificationClassifier, PostId, ReactionId,
    VoterLoader, VoterTab, VotersOutcome,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chainblog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Feeds, notifications and voters for a blockchain social blog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Off-chain feed service URL (overrides config)
    #[arg(long, global = true)]
    pub feed_url: Option<String>,

    /// Chain indexer URL (overrides config)
    #[arg(long, global = true)]
    pub chain_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show an account's news feed
    Feed {
        account: String,
        /// Page size (default: from config)
        #[arg(short, long)]
        limit: Option<u64>,
        /// Maximum number of pages to load
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },

    /// Show an account's notifications
    Notifications {
        account: String,
        /// Page size (default: from config)
        #[arg(short, long)]
        limit: Option<u64>,
        /// Maximum number of pages to load
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },

    /// Show voters for a list of reaction ids (hex)
    Voters {
        #[arg(required = true)]
        reactions: Vec<String>,
    },

    /// Show voters of a post
    PostVoters {
        /// Post id (hex)
        post: String,
    },

    /// Show voters of a comment
    CommentVoters {
        /// Comment id (hex)
        comment: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.feed_url {
        config.feed.url = url.clone();
    }
    if let Some(url) = &cli.chain_url {
        config.chain.url = url.clone();
    }

    init_tracing(&config);
    tracing::debug!(feed = %config.feed.url, chain = %config.chain.url, "configured services");

    let json = cli.format == "json";

    match cli.command {
        Commands::Feed {
            account,
            limit,
            pages,
        } => {
            let (items, _) =
                load_feed(&config, FeedKind::News, &account, limit, pages).await?;
            let chain = Arc::new(HttpChainQuery::new(config.chain.client_config())?);
            let news = NewsResolver::new(chain).resolve_all(&items).await?;
            print_news(&news, json)?;
        }

        Commands::Notifications {
            account,
            limit,
            pages,
        } => {
            let (items, has_more) =
                load_feed(&config, FeedKind::Notifications, &account, limit, pages).await?;
            let chain = Arc::new(HttpChainQuery::new(config.chain.client_config())?);
            let outcomes = NotificationClassifier::new(chain)
                .classify_all(&items)
                .await?;
            print_notifications(&outcomes, has_more, json)?;
        }

        Commands::Voters { reactions } => {
            let ids = reactions
                .iter()
                .map(|raw| {
                    raw.parse::<ReactionId>()
                        .with_context(|| format!("invalid reaction id {:?}", raw))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let chain = Arc::new(HttpChainQuery::new(config.chain.client_config())?);
            let outcome = VoterLoader::new(chain, Mount::new()).load(&ids).await?;
            print_voters(outcome, json)?;
        }

        Commands::PostVoters { post } => {
            let post_id: PostId = post
                .parse()
                .with_context(|| format!("invalid post id {:?}", post))?;
            let chain = Arc::new(HttpChainQuery::new(config.chain.client_config())?);
            let outcome = VoterLoader::new(chain, Mount::new())
                .load_for_post(post_id)
                .await?;
            print_voters(outcome, json)?;
        }

        Commands::CommentVoters { comment } => {
            let comment_id: CommentId = comment
                .parse()
                .with_context(|| format!("invalid comment id {:?}", comment))?;
            let chain = Arc::new(HttpChainQuery::new(config.chain.client_config())?);
            let outcome = VoterLoader::new(chain, Mount::new())
                .load_for_comment(comment_id)
                .await?;
            print_voters(outcome, json)?;
        }

        Commands::Config { output } => {
            let content = chainblog::config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.filter_directive()));
    let json = config.logging.is_json();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn load_feed(
    config: &Config,
    kind: FeedKind,
    account: &str,
    limit: Option<u64>,
    pages: usize,
) -> anyhow::Result<(Vec<chainblog::Activity>, bool)> {
    let service: Arc<dyn FeedService> =
        Arc::new(HttpFeedService::new(config.feed.client_config())?);
    let mut loader = FeedLoader::new(
        service,
        kind,
        AccountId::new(account),
        limit.unwrap_or(config.feed.page_size),
        Mount::new(),
    );

    let loaded = loader.load_pages(pages.max(1)).await?;
    let snapshot = loader.snapshot();
    tracing::info!(
        %kind,
        pages = loaded,
        items = snapshot.items.len(),
        has_more = snapshot.has_more,
        "feed loaded"
    );
    Ok((snapshot.items, snapshot.has_more))
}

fn print_news(items: &[NewsItem], json: bool) -> anyhow::Result<()> {
    if json {
        let rows: Vec<serde_json::Value> = items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "activity": item.activity(),
                    "post": item.post(),
                    "shared": item.original(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("Your feed is empty.");
        return Ok(());
    }

    for item in items {
        let activity = item.activity();
        let date = activity.date.format("%Y-%m-%d %H:%M");
        match item {
            NewsItem::Post { post, .. } => println!(
                "{}  {:<24} {:>+4}  {} ({} comments)",
                date,
                activity.event,
                post.score(),
                post.display_title(),
                post.comments_count
            ),
            NewsItem::SharedPost { original, .. } => println!(
                "{}  {:<24} {:>+4}  shared: {} ({} comments)",
                date,
                activity.event,
                original.score(),
                original.display_title(),
                original.comments_count
            ),
            NewsItem::SharedPostNotFound { original_id, .. } => println!(
                "{}  {:<24}        shared post {} not found",
                date, activity.event, original_id
            ),
            NewsItem::PostNotFound { post_id, .. } => {
                println!("{}  {:<24}        post {} not found", date, activity.event, post_id)
            }
            NewsItem::NoPost { event, .. } => {
                println!("{}  {:<24}        {} by {}", date, event, event, activity.account.short())
            }
            NewsItem::Malformed { error, .. } => {
                println!("{}  {:<24}        {}", date, activity.event, error)
            }
        }
    }
    Ok(())
}

fn print_notifications(
    outcomes: &[ClassifyOutcome],
    has_more: bool,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let notifications: Vec<_> = outcomes.iter().filter_map(|o| o.notification()).collect();
        let unresolved: Vec<serde_json::Value> = outcomes
            .iter()
            .filter_map(|o| match o {
                ClassifyOutcome::Unresolvable { activity, reason } => Some(serde_json::json!({
                    "activity": activity,
                    "reason": reason.to_string(),
                })),
                ClassifyOutcome::Classified(_) => None,
            })
            .collect();
        let body = serde_json::json!({
            "notifications": notifications,
            "unresolved": unresolved,
            "has_more": has_more,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if outcomes.is_empty() {
        println!("No notifications yet.");
        return Ok(());
    }

    for outcome in outcomes {
        match outcome {
            ClassifyOutcome::Classified(n) => {
                println!("{}  {}", n.date.format("%Y-%m-%d %H:%M"), n.summary())
            }
            ClassifyOutcome::Unresolvable { activity, reason } => println!(
                "{}  [unavailable: {}]",
                activity.date.format("%Y-%m-%d %H:%M"),
                reason
            ),
        }
    }
    if has_more {
        println!();
        println!("More notifications available (use --pages to load more)");
    }
    Ok(())
}

fn print_voters(outcome: VotersOutcome, json: bool) -> anyhow::Result<()> {
    let tabs = match outcome {
        VotersOutcome::Loaded(tabs) => tabs,
        VotersOutcome::PostNotFound(id) => anyhow::bail!("post {} not found", id),
        VotersOutcome::CommentNotFound(id) => anyhow::bail!("comment {} not found", id),
        VotersOutcome::Unmounted => return Ok(()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tabs)?);
        return Ok(());
    }

    println!("{}", tabs.header());
    for tab in VoterTab::all() {
        println!("{}", tabs.label(*tab));
        for reaction in tabs.tab(*tab) {
            println!("  {:<10} {}", reaction.kind, reaction.voter());
        }
    }
    if !tabs.unresolved().is_empty() {
        println!();
        println!("{} reaction(s) could not be found", tabs.unresolved().len());
    }
    Ok(())
}
