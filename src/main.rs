//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::{commands, server, Folio};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Render and manage posts of a REST-backed blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of posts
    #[command(alias = "ls")]
    List {
        /// Zero-based page index
        #[arg(short, long, default_value = "0")]
        page: usize,

        /// Posts per page (defaults to page_size from the config)
        #[arg(short, long)]
        size: Option<usize>,

        /// Filter all posts locally by title, author, tags or slug instead
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Search posts on the server
    Search {
        term: String,

        #[arg(short, long, default_value = "0")]
        page: usize,
    },

    /// Show a post by slug
    Show {
        slug: String,

        /// Print the rendered article HTML
        #[arg(long)]
        html: bool,
    },

    /// Render local markdown files
    Render {
        /// A markdown file or a directory of them
        path: PathBuf,

        /// Output directory for the rendered HTML
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show blog statistics
    Stats,

    /// Create or update a post from a YAML draft
    Save { draft: PathBuf },

    /// Delete a post by id
    Delete { id: String },

    /// Start a preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let folio = || Folio::new(&base_dir);

    match cli.command {
        Commands::List { page, size, filter } => match filter {
            Some(query) => commands::list::filter(&folio()?, &query)?,
            None => commands::list::run(&folio()?, page, size)?,
        },

        Commands::Search { term, page } => {
            commands::list::search(&folio()?, &term, page)?;
        }

        Commands::Show { slug, html } => {
            commands::show::run(&folio()?, &slug, html)?;
        }

        Commands::Render { path, out } => {
            commands::render::run(&folio()?, &path, out.as_deref())?;
        }

        Commands::Stats => {
            commands::stats::run(&folio()?)?;
        }

        Commands::Save { draft } => {
            tracing::info!("Saving draft {:?}", draft);
            commands::admin::save(&folio()?, &draft)?;
        }

        Commands::Delete { id } => {
            commands::admin::delete(&folio()?, &id)?;
        }

        Commands::Serve { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&folio()?, &ip, port).await?;
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
