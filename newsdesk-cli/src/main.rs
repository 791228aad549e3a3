//! Newsdesk CLI
//!
//! Command-line front end for the newsdesk post store.
//!
//! # Usage
//!
//! ```bash
//! # Create tables (postgres only)
//! newsdesk --backend postgres --database-url postgres://localhost/news init-schema
//!
//! # Add a post
//! newsdesk add --id 1 --title "Hello" --content "First post" --author-id 10 --author-name Alice
//!
//! # List posts as JSON
//! newsdesk list --json
//! ```
//!
//! `NEWSDESK_BACKEND` and `NEWSDESK_DATABASE_URL` (also read from `.env`)
//! supply the flags' defaults.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use newsdesk_core::{
    connect, BackendKind, Post, PostStore, PostgresStore, StoreConfig, ENV_BACKEND,
    ENV_DATABASE_URL,
};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Application name
pub const APP_NAME: &str = "newsdesk";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// CLI
// =============================================================================

/// Manage posts in a newsdesk store
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Manage posts in a newsdesk store", long_about = None)]
#[command(version)]
struct Cli {
    /// Storage backend (memory, postgres, mongo)
    #[arg(long, env = ENV_BACKEND, default_value = "memory", global = true)]
    backend: BackendKind,

    /// Database connection string
    #[arg(long, env = ENV_DATABASE_URL, global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Store(StoreCommand),
    /// Create the postgres tables if missing
    InitSchema,
}

/// Commands that run against any backend through `PostStore`.
#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// List all posts
    List {
        /// Print JSON instead of one line per post
        #[arg(long)]
        json: bool,
    },
    /// Add a post
    Add(AddArgs),
    /// Replace title, content, author and publication time of a post
    Update(UpdateArgs),
    /// Delete a post
    Delete {
        /// Post id
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args, Debug)]
struct PostFields {
    /// Post id
    #[arg(long)]
    id: i64,
    /// Title
    #[arg(long)]
    title: String,
    /// Body text
    #[arg(long)]
    content: String,
    /// Author id
    #[arg(long)]
    author_id: i64,
    /// Author display name
    #[arg(long)]
    author_name: String,
}

impl PostFields {
    fn into_post(self, published_at: Option<DateTime<Utc>>) -> Post {
        let builder = Post::builder(self.id)
            .title(self.title)
            .content(self.content)
            .author(self.author_id, self.author_name);

        match published_at {
            Some(at) => builder.published(at).build(),
            None => builder.build(),
        }
    }
}

#[derive(Args, Debug)]
struct AddArgs {
    #[command(flatten)]
    fields: PostFields,
    /// Publication time (RFC 3339); omitted means unpublished
    #[arg(long)]
    published_at: Option<DateTime<Utc>>,
}

impl AddArgs {
    fn into_post(self) -> Post {
        self.fields.into_post(self.published_at)
    }
}

/// An update replaces the publication time, so it must be stated.
#[derive(Args, Debug)]
struct UpdateArgs {
    #[command(flatten)]
    fields: PostFields,
    /// New publication time (RFC 3339)
    #[arg(long, required_unless_present = "draft", conflicts_with = "draft")]
    published_at: Option<DateTime<Utc>>,
    /// Mark the post unpublished
    #[arg(long)]
    draft: bool,
}

impl UpdateArgs {
    fn into_post(self) -> Post {
        self.fields.into_post(self.published_at)
    }
}

fn print_posts(posts: &[Post], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(posts)?);
        return Ok(());
    }

    for post in posts {
        let published = post
            .published_at_utc()
            .map_or_else(|| "draft".to_string(), |at| at.to_rfc3339());
        println!(
            "{}\t{}\t{} ({})\t{}",
            post.id, post.title, post.author_name, post.author_id, published
        );
    }
    Ok(())
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn,newsdesk_core=info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{}", APP_NAME, APP_VERSION);

    let config = StoreConfig::new(cli.backend, cli.database_url);

    match cli.command {
        Commands::InitSchema => init_schema(&config).await,
        Commands::Store(command) => {
            if config.backend == BackendKind::Memory {
                tracing::warn!("memory backend: changes are discarded on exit");
            }
            let store = connect(&config).await?;
            run(store.as_ref(), command).await
        }
    }
}

async fn init_schema(config: &StoreConfig) -> anyhow::Result<()> {
    anyhow::ensure!(
        config.backend == BackendKind::Postgres,
        "init-schema only applies to the postgres backend"
    );
    config.validate()?;

    let store = PostgresStore::new(config.url.as_deref().unwrap_or_default()).await?;
    store.init_schema().await?;
    store.close().await;
    Ok(())
}

async fn run(store: &dyn PostStore, command: StoreCommand) -> anyhow::Result<()> {
    match command {
        StoreCommand::List { json } => {
            let posts = store.posts().await?;
            print_posts(&posts, json)?;
        }
        StoreCommand::Add(args) => {
            let post = args.into_post();
            store.add_post(&post).await?;
            tracing::info!(post_id = post.id, backend = store.backend_name(), "post added");
        }
        StoreCommand::Update(args) => {
            let post = args.into_post();
            store.update_post(&post).await?;
            tracing::info!(post_id = post.id, backend = store.backend_name(), "post updated");
        }
        StoreCommand::Delete { id } => {
            // Deletion only reads the id
            let post = Post::builder(id).build();
            store.delete_post(&post).await?;
            tracing::info!(post_id = id, backend = store.backend_name(), "post deleted");
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use newsdesk_core::MemoryStore;

    const POST_FLAGS: [&str; 10] = [
        "--id",
        "3",
        "--title",
        "T",
        "--content",
        "C",
        "--author-id",
        "1",
        "--author-name",
        "Ann",
    ];

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once(APP_NAME).chain(args.iter().copied()))
    }

    fn store_command(cli: Cli) -> StoreCommand {
        match cli.command {
            Commands::Store(command) => command,
            Commands::InitSchema => panic!("expected a store command"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&[
            "--backend",
            "mongo",
            "add",
            "--id",
            "1",
            "--title",
            "A",
            "--content",
            "B",
            "--author-id",
            "10",
            "--author-name",
            "Alice",
            "--published-at",
            "2023-11-14T22:13:20Z",
        ])
        .unwrap();

        assert_eq!(cli.backend, BackendKind::Mongo);
        let StoreCommand::Add(args) = store_command(cli) else {
            panic!("expected add command");
        };
        let post = args.into_post();
        assert_eq!(post.id, 1);
        assert_eq!(post.author_name, "Alice");
        assert_eq!(post.published_at, 1_700_000_000);
    }

    #[test]
    fn test_parse_init_schema() {
        let cli = parse(&["init-schema"]).unwrap();
        assert!(matches!(cli.command, Commands::InitSchema));
    }

    #[test]
    fn test_update_requires_publication_choice() {
        let mut args = vec!["update"];
        args.extend(POST_FLAGS);
        let err = parse(&args).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let mut both = args.clone();
        both.extend(["--draft", "--published-at", "2023-11-14T22:13:20Z"]);
        assert!(parse(&both).is_err());
    }

    #[test]
    fn test_update_draft_unpublishes() {
        let mut args = vec!["update"];
        args.extend(POST_FLAGS);
        args.push("--draft");

        let StoreCommand::Update(update) = store_command(parse(&args).unwrap()) else {
            panic!("expected update command");
        };
        assert!(!update.into_post().is_published());
    }

    #[tokio::test]
    async fn test_init_schema_rejects_other_backends() {
        let err = init_schema(&StoreConfig::default()).await.unwrap_err();
        assert!(err.to_string().contains("postgres"));
    }

    #[tokio::test]
    async fn test_run_against_memory_store() {
        let store = MemoryStore::new();

        let mut add = vec!["add"];
        add.extend(POST_FLAGS);
        run(&store, store_command(parse(&add).unwrap())).await.unwrap();
        assert_eq!(store.posts().await.unwrap().len(), 1);

        let mut update = vec!["update"];
        update.extend(POST_FLAGS);
        update.extend(["--published-at", "2023-11-14T22:13:20Z"]);
        run(&store, store_command(parse(&update).unwrap())).await.unwrap();
        assert_eq!(store.posts().await.unwrap()[0].published_at, 1_700_000_000);

        let delete = parse(&["delete", "--id", "3"]).unwrap();
        run(&store, store_command(delete)).await.unwrap();
        assert!(store.posts().await.unwrap().is_empty());

        let again = parse(&["delete", "--id", "3"]).unwrap();
        let err = run(&store, store_command(again)).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
