//! CLI command implementations

mod books;
mod open;
mod reviews;

pub use books::{add_book, delete_book, edit_book, BookFields};
pub use open::open;
pub use reviews::{add_review, delete_review, edit_review, ReviewFields};

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use bookshelf_core::{Catalog, CatalogClient};

use crate::settings::Settings;
use crate::transport::UreqTransport;
use crate::views::{ActionOutcome, Submission};

/// What every command needs: the bound catalog and the list page size.
pub struct Session {
    pub catalog: Catalog<UreqTransport>,
    pub page_size: u32,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            catalog: Catalog::new(CatalogClient::new(&settings.api_url), UreqTransport::new()),
            page_size: settings.page_size,
        }
    }
}

/// Resolve a pending confirmation: `--yes` accepts, otherwise ask on stdin.
/// Anything but `y`/`yes` declines, including end of input.
fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn finish_action(outcome: ActionOutcome) -> Result<()> {
    match outcome {
        ActionOutcome::Done | ActionOutcome::NothingPending => Ok(()),
        ActionOutcome::Navigate(route) => {
            println!("-> {route}");
            Ok(())
        }
        ActionOutcome::Alert(message) => bail!(message),
    }
}

/// Turn a non-saved submission into the command's error.
fn saved<T>(submission: Submission<T>) -> Result<T> {
    match submission {
        Submission::Saved { value, navigate } => {
            if let Some(route) = navigate {
                println!("-> {route}");
            }
            Ok(value)
        }
        Submission::Rejected(reason) => bail!("{reason}"),
        Submission::Failed(message) => bail!(message),
    }
}
