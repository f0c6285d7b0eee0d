//! FAExport main entry point
//!
//! A command-line front-end for the FAExport library: loads a configuration,
//! fetches one record and prints it as JSON.

use clap::{Args, Parser, Subcommand};
use faexport::config::{load_config_with_hash, Config};
use faexport::extract::{FolderKind, WatchDirection};
use faexport::search::SearchQuery;
use faexport::{FaClient, RequestSession};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// FAExport: structured data from FurAffinity
///
/// Fetches FurAffinity pages, optionally as a logged-in user, and prints the
/// extracted record as pretty JSON.
#[derive(Parser, Debug)]
#[command(name = "faexport")]
#[command(version = "1.0.0")]
#[command(about = "Structured data from FurAffinity pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Login cookie for this request, as 'b=<token>; a=<token>'
    #[arg(long, value_name = "COOKIE", global = true)]
    cookie: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Profile of a user
    User { name: String },
    /// Shouts on a user's profile
    Shouts { name: String },
    /// A single submission
    Submission { id: String },
    /// A single journal
    Journal { id: String },
    /// Journal ids of a user
    Journals { name: String },
    /// Submission ids in a user's gallery
    Gallery(FolderArgs),
    /// Submission ids in a user's scraps
    Scraps(FolderArgs),
    /// Submission ids in a user's favorites
    Favorites(FolderArgs),
    /// Users watching a user
    Watchers(WatchArgs),
    /// Users a user is watching
    Watching(WatchArgs),
    /// Full-text submission search
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct FolderArgs {
    name: String,

    /// First page to fetch
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Maximum number of pages to fetch (defaults to crawler.max-pages)
    #[arg(long)]
    max_pages: Option<u32>,
}

#[derive(Args, Debug)]
struct WatchArgs {
    name: String,

    #[arg(long, default_value_t = 1)]
    page: u32,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search terms
    q: String,

    #[arg(long)]
    page: Option<String>,

    #[arg(long)]
    perpage: Option<String>,

    /// relevancy, date or popularity
    #[arg(long)]
    order_by: Option<String>,

    /// asc or desc
    #[arg(long)]
    order_direction: Option<String>,

    /// day, 3days, week, month or all
    #[arg(long)]
    range: Option<String>,

    /// all, any or extended
    #[arg(long)]
    mode: Option<String>,

    /// Comma-separated ratings: general, mature, adult
    #[arg(long)]
    rating: Option<String>,

    /// Comma-separated types: art, flash, photo, music, story, poetry
    #[arg(long = "type")]
    types: Option<String>,
}

impl SearchArgs {
    fn to_query(&self) -> faexport::Result<SearchQuery> {
        let mut params = vec![("q", self.q.clone())];
        let optional = [
            ("page", &self.page),
            ("perpage", &self.perpage),
            ("order_by", &self.order_by),
            ("order_direction", &self.order_direction),
            ("range", &self.range),
            ("mode", &self.mode),
            ("rating", &self.rating),
            ("type", &self.types),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                params.push((key, value.clone()));
            }
        }
        SearchQuery::from_params(&params)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let client = FaClient::connect(&config).await?;

    let mut session = client.request();
    if let Some(cookie) = &cli.cookie {
        session.set_override(cookie)?;
    }

    if let Err(e) = run(&client, &config, &session, cli.command).await {
        match e.url() {
            Some(url) => tracing::error!("{} ({})", e, url),
            None => tracing::error!("{}", e),
        }
        return Err(e.into());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("faexport=info,warn"),
            1 => EnvFilter::new("faexport=debug,info"),
            2 => EnvFilter::new("faexport=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(
    client: &FaClient,
    config: &Config,
    session: &RequestSession,
    command: Command,
) -> faexport::Result<()> {
    let folder = move |kind: FolderKind, args: FolderArgs| async move {
        let max_pages = args.max_pages.unwrap_or(config.crawler.max_pages);
        client
            .submissions(&args.name, kind, args.page, max_pages, session)
            .await
    };

    match command {
        Command::User { name } => print_json(&client.user(&name, session).await?),
        Command::Shouts { name } => print_json(&client.shouts(&name, session).await?),
        Command::Submission { id } => print_json(&client.submission(&id, session).await?),
        Command::Journal { id } => print_json(&client.journal(&id, session).await?),
        Command::Journals { name } => print_json(&client.journals(&name, session).await?),
        Command::Gallery(args) => print_json(&folder(FolderKind::Gallery, args).await?),
        Command::Scraps(args) => print_json(&folder(FolderKind::Scraps, args).await?),
        Command::Favorites(args) => print_json(&folder(FolderKind::Favorites, args).await?),
        Command::Watchers(args) => print_json(
            &client
                .watch_list(&args.name, WatchDirection::Watchers, args.page, session)
                .await?,
        ),
        Command::Watching(args) => print_json(
            &client
                .watch_list(&args.name, WatchDirection::Watching, args.page, session)
                .await?,
        ),
        Command::Search(args) => {
            let query = args.to_query()?;
            print_json(&client.search(&query, session).await?)
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize output: {}", e),
    }
}
