use std::fmt::Write;

use tracing::error;

use bookshelf_core::{ApiError, Book, BookFormData, BookId, Catalog, Transport};

use super::Submission;
use crate::router::Route;

pub const SAVE_BOOK_FAILED: &str = "Failed to save book. Please try again.";

/// Raw field values as the user typed them. Empty text and a zero year
/// mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub description: String,
    pub publication_year: i32,
}

impl BookDraft {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone().unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
            publication_year: book.publication_year.unwrap_or(0),
        }
    }

    pub fn to_form_data(&self) -> BookFormData {
        fn present(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        BookFormData {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: present(&self.isbn),
            description: present(&self.description),
            publication_year: (self.publication_year != 0).then_some(self.publication_year),
        }
    }
}

/// The add/edit book page body.
#[derive(Debug, Clone)]
pub struct BookFormView {
    editing: Option<BookId>,
    draft: BookDraft,
    error: Option<String>,
}

impl BookFormView {
    pub fn new() -> Self {
        Self {
            editing: None,
            draft: BookDraft::default(),
            error: None,
        }
    }

    /// A form prefilled from `book`; submitting updates it in place.
    pub fn edit(book: &Book) -> Self {
        Self {
            editing: Some(book.id),
            draft: BookDraft::from_book(book),
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookDraft {
        &mut self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Create or update, then send the user home on success.
    pub fn submit<T: Transport>(&mut self, catalog: &Catalog<T>) -> Submission<Book> {
        self.error = None;
        let payload = self.draft.to_form_data();
        let result = match self.editing {
            Some(id) => catalog.update_book(id, &payload),
            None => catalog.create_book(&payload),
        };

        match result {
            Ok(book) => Submission::Saved {
                value: book,
                navigate: Some(Route::Home),
            },
            Err(ApiError::Validation(reason)) => {
                self.error = Some(reason.to_string());
                Submission::Rejected(reason)
            }
            Err(err) => {
                error!(book_id = ?self.editing, error = %err, "failed to save book");
                self.error = Some(SAVE_BOOK_FAILED.to_string());
                Submission::Failed(SAVE_BOOK_FAILED)
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let heading = if self.is_editing() { "Edit Book" } else { "Add New Book" };
        let _ = writeln!(out, "{heading}");
        if let Some(error) = &self.error {
            let _ = writeln!(out, "  ! {error}");
        }
        let year = match self.draft.publication_year {
            0 => String::new(),
            year => year.to_string(),
        };
        let _ = writeln!(out, "  Title *: {}", self.draft.title);
        let _ = writeln!(out, "  Author *: {}", self.draft.author);
        let _ = writeln!(out, "  ISBN: {}", self.draft.isbn);
        let _ = writeln!(out, "  Publication Year: {year}");
        let _ = writeln!(out, "  Description: {}", self.draft.description);
        out
    }
}

impl Default for BookFormView {
    fn default() -> Self {
        Self::new()
    }
}
