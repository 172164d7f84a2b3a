//! URL patterns understood by the client.

use std::fmt;
use std::str::FromStr;

use bookshelf_core::BookId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Home,
    /// `/books/new`
    NewBook,
    /// `/books/{id}`
    BookDetail(BookId),
    /// `/books/{id}/edit`
    EditBook(BookId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoute(pub String);

impl fmt::Display for UnknownRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no page matches {:?}", self.0)
    }
}

impl std::error::Error for UnknownRoute {}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownRoute(path.to_string());
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::Home),
            ["books", "new"] => Ok(Route::NewBook),
            ["books", id] => parse_id(id).map(Route::BookDetail).ok_or_else(unknown),
            ["books", id, "edit"] => parse_id(id).map(Route::EditBook).ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

/// Ids are positive; anything else is not a page.
fn parse_id(raw: &str) -> Option<BookId> {
    raw.parse::<BookId>().ok().filter(|id| *id > 0)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::NewBook => write!(f, "/books/new"),
            Route::BookDetail(id) => write!(f, "/books/{id}"),
            Route::EditBook(id) => write!(f, "/books/{id}/edit"),
        }
    }
}
