//! Bookshelf CLI - browse and edit the book catalogue from the terminal

use std::path::PathBuf;

use anyhow::Result;
use bookshelf_core::{BookId, ReviewId};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookshelf_cli::commands::{self, BookFields, ReviewFields, Session};
use bookshelf_cli::settings::{Overrides, Settings};

/// Parse a list page number (must be at least 1)
fn parse_page(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| format!("'{}' is not a valid page number", s))?;
    if n < 1 {
        Err("page must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./bookshelf.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API root, e.g. http://localhost:8000/api/v1
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Items per list page (1-100)
    #[arg(long, global = true)]
    page_size: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page: /, /books/new, /books/{id} or /books/{id}/edit
    Open {
        /// Page path
        #[arg(default_value = "/")]
        path: String,

        /// Book list page
        #[arg(long, default_value = "1", value_parser = parse_page)]
        page: u32,

        /// Review list page on a book's detail page
        #[arg(long, default_value = "1", value_parser = parse_page)]
        reviews_page: u32,
    },

    /// Add a book
    AddBook {
        #[command(flatten)]
        fields: BookFields,
    },

    /// Edit a book; fields not given keep their current value
    EditBook {
        /// Book id
        id: BookId,

        #[command(flatten)]
        fields: BookFields,
    },

    /// Delete a book and all of its reviews
    DeleteBook {
        /// Book id
        id: BookId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a review to a book
    AddReview {
        /// Book id
        book_id: BookId,

        #[command(flatten)]
        fields: ReviewFields,
    },

    /// Edit a review; fields not given keep their current value
    EditReview {
        /// Review id
        id: ReviewId,

        #[command(flatten)]
        fields: ReviewFields,
    },

    /// Delete a review
    DeleteReview {
        /// Review id
        id: ReviewId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so rendered pages stay clean on stdout.
    let filter = if cli.verbose {
        "bookshelf=debug,bookshelf_cli=debug,bookshelf_core=debug"
    } else {
        "bookshelf=warn,bookshelf_cli=warn,bookshelf_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::load(&Overrides {
        config_path: cli.config,
        api_url: cli.api_url,
        page_size: cli.page_size,
    })?;
    tracing::debug!(api_url = %settings.api_url, page_size = settings.page_size, "settings loaded");
    let session = Session::new(&settings);

    match cli.command {
        Commands::Open {
            path,
            page,
            reviews_page,
        } => commands::open(&session, &path, page, reviews_page),

        Commands::AddBook { fields } => commands::add_book(&session, fields),

        Commands::EditBook { id, fields } => commands::edit_book(&session, id, fields),

        Commands::DeleteBook { id, yes } => commands::delete_book(&session, id, yes),

        Commands::AddReview { book_id, fields } => commands::add_review(&session, book_id, fields),

        Commands::EditReview { id, fields } => commands::edit_review(&session, id, fields),

        Commands::DeleteReview { id, yes } => commands::delete_review(&session, id, yes),
    }
}
