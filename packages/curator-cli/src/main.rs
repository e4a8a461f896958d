//! Operator CLI for the product curation dashboard.
//!
//! Wires the extraction subsystem, the curation API client, and the review
//! board into a terminal surface: submit marketplace URLs, review the
//! staged records, and organize approved products into seasons.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use curation_client::{HttpCurationClient, ProductId, ProductRecord, ProductStatus};
use product_extractor::{build_draft, AllOriginsFetcher, FetchConfig, ProductDraft};
use review_board::{Board, PersistOutcome, StatusScope};

use config::Config;

#[derive(Parser)]
#[command(name = "curator", about = "Curate marketplace products into seasons")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract product metadata from a URL without persisting anything
    Fetch { url: String },

    /// Extract product metadata and stage it for review
    Add { url: String },

    /// List records, optionally filtered by status
    List {
        /// all | pending | approved | disapproved
        #[arg(default_value = "pending")]
        scope: StatusScope,
    },

    /// Approve a record (or un-approve it back to pending)
    Approve { id: i64 },

    /// Reject a record
    Reject { id: i64 },

    /// Bring a rejected record back to pending review
    Restore { id: i64 },

    /// Delete one record
    Delete { id: i64 },

    /// Delete every record
    DeleteAll {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },

    /// Archive a record's images server-side
    Archive { id: i64 },

    /// Manage seasons
    #[command(subcommand)]
    Season(SeasonCommand),
}

#[derive(Subcommand)]
enum SeasonCommand {
    /// List seasons and their member counts
    List,
    /// Create an empty season
    Create { name: String },
    /// Rename a season, cascading to its records
    Rename { name: String, new_name: String },
    /// Delete a season; its records stay, unassigned
    Delete { name: String },
    /// Assign a record to a season
    Assign { id: i64, name: String },
    /// Clear a record's season
    Clear { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "warn,product_extractor=info,curation_client=info,review_board=info".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    tracing::debug!(api_base = %config.api_base, proxy_base = %config.proxy_base, "configured");

    let fetcher = AllOriginsFetcher::new(
        FetchConfig::default()
            .with_proxy_base(config.proxy_base.clone())
            .with_timeout(config.fetch_timeout),
    )
    .context("failed to build the proxy fetcher")?;

    // `fetch` needs no API session; everything else connects first.
    if let Command::Fetch { url } = &cli.command {
        let draft = build_draft(url, &fetcher).await?;
        print_draft(&draft);
        return Ok(());
    }

    let client = HttpCurationClient::new(&config.api_base)
        .context("failed to build the curation API client")?;
    let mut board = Board::connect(client)
        .await
        .context("failed to connect to the curation API")?;

    match board.user() {
        Some(user) => println!("Signed in as {}", user.username.bold()),
        None => println!("{}", "Guest mode: nothing loaded from the server".dimmed()),
    }

    match cli.command {
        Command::Fetch { .. } => unreachable!("handled above"),

        Command::Add { url } => {
            let draft = build_draft(&url, &fetcher).await?;
            print_draft(&draft);
            let id = board.add_product(&draft).await?;
            println!("{} staged as #{id} (pending review)", "Added".green().bold());
        }

        Command::List { scope } => {
            let records = board.filter(scope);
            if records.is_empty() {
                println!("{}", "No products to show".dimmed());
            }
            for record in records {
                print_record(record);
            }
        }

        Command::Approve { id } => {
            let outcome = board.toggle_approval(ProductId(id)).await?;
            if let Some(record) = board.record(ProductId(id)) {
                println!("#{id} is now {}", status_label(record.status));
            }
            warn_if_local_only(&outcome);
        }

        Command::Reject { id } => {
            let outcome = board.reject(ProductId(id)).await?;
            println!("#{id} is now {}", status_label(ProductStatus::Disapproved));
            warn_if_local_only(&outcome);
        }

        Command::Restore { id } => {
            let outcome = board.restore(ProductId(id)).await?;
            println!("#{id} is now {}", status_label(ProductStatus::Pending));
            warn_if_local_only(&outcome);
        }

        Command::Delete { id } => {
            board.delete_product(ProductId(id)).await?;
            println!("{} #{id}", "Deleted".red().bold());
        }

        Command::DeleteAll { yes } => {
            if !yes {
                anyhow::bail!("refusing to delete everything without --yes");
            }
            board.delete_all().await?;
            println!("{}", "Deleted all products".red().bold());
        }

        Command::Archive { id } => {
            let saved = board.archive_images(ProductId(id)).await?;
            println!(
                "Archived {} image(s) to {}",
                saved.saved_count,
                saved.folder_path.bold()
            );
        }

        Command::Season(season) => match season {
            SeasonCommand::List => {
                if board.seasons().is_empty() {
                    println!("{}", "No seasons yet".dimmed());
                }
                for (name, members) in board.seasons() {
                    println!("{} ({} products)", name.bold(), members.len());
                }
            }
            SeasonCommand::Create { name } => {
                board.create_season(&name).await?;
                println!("Created season {}", name.bold());
            }
            SeasonCommand::Rename { name, new_name } => {
                board.rename_season(&name, &new_name).await?;
                println!("Renamed {} to {}", name.bold(), new_name.bold());
            }
            SeasonCommand::Delete { name } => {
                board.delete_season(&name).await?;
                println!("Deleted season {} (its products were kept)", name.bold());
            }
            SeasonCommand::Assign { id, name } => {
                board.assign_season(ProductId(id), Some(&name)).await?;
                println!("#{id} assigned to {}", name.bold());
            }
            SeasonCommand::Clear { id } => {
                board.assign_season(ProductId(id), None).await?;
                println!("#{id} removed from its season");
            }
        },
    }

    Ok(())
}

fn print_draft(draft: &ProductDraft) {
    println!("{}", draft.name.bold());
    println!("  url       {}", draft.url);
    println!("  price     {} {}", draft.price, draft.currency);
    println!("  images    {}", draft.images.len());
    if let Some(primary) = draft.images.first() {
        println!("  primary   {primary}");
    }
    println!();
    println!("{}", draft.description.dimmed());
}

fn print_record(record: &ProductRecord) {
    let season = record
        .season
        .as_deref()
        .map(|s| format!("  [{s}]"))
        .unwrap_or_default();
    println!(
        "#{:<5} {}  {}{}",
        record.id,
        status_label(record.status),
        record.name.bold(),
        season.cyan()
    );
}

fn status_label(status: ProductStatus) -> colored::ColoredString {
    match status {
        ProductStatus::Pending => "pending".yellow(),
        ProductStatus::Approved => "approved".green(),
        ProductStatus::Disapproved => "disapproved".red(),
    }
}

fn warn_if_local_only(outcome: &PersistOutcome) {
    if let PersistOutcome::LocalOnly { warning } = outcome {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
}
