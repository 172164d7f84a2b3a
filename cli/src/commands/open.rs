//! Open command implementation

use anyhow::{bail, Context, Result};

use crate::router::Route;
use crate::views::{BookDetailView, Page};

use super::Session;

/// Render the page behind `path`, optionally on a later list page.
pub fn open(session: &Session, path: &str, page: u32, reviews_page: u32) -> Result<()> {
    let route: Route = path.parse().with_context(|| format!("cannot open {path}"))?;
    let mut view = match route {
        Route::BookDetail(id) => Page::BookDetail(BookDetailView::with_reviews_page(
            id,
            session.page_size,
            reviews_page,
        )),
        route => Page::open(route, session.page_size),
    };
    let catalog = &session.catalog;

    match &mut view {
        Page::Home(list) if page > 1 => {
            list.on_page_change(catalog, page);
        }
        other => {
            other.load(catalog);
        }
    }

    print!("{}", view.render());
    if let Some(error) = view.error() {
        bail!("{error}");
    }
    Ok(())
}
