use std::fmt::Write;

use tracing::error;

use bookshelf_core::{BookHook, BookId, Catalog, Transport};

use super::book_list::DELETE_BOOK_FAILED;
use super::confirm::Confirmation;
use super::review_list::ReviewListView;
use super::ActionOutcome;
use crate::router::Route;

pub const DELETE_BOOK_WITH_REVIEWS_PROMPT: &str =
    "Are you sure you want to delete this book? This will also delete all reviews.";

/// `/books/{id}`: the book, its actions and its reviews.
#[derive(Debug)]
pub struct BookDetailView {
    book_id: BookId,
    hook: BookHook,
    reviews: ReviewListView,
    confirm: Confirmation<BookId>,
}

impl BookDetailView {
    pub fn new(book_id: BookId, page_size: u32) -> Self {
        Self::with_reviews_page(book_id, page_size, 1)
    }

    pub fn with_reviews_page(book_id: BookId, page_size: u32, reviews_page: u32) -> Self {
        Self {
            book_id,
            hook: BookHook::new(book_id),
            reviews: ReviewListView::with_page(book_id, page_size, reviews_page),
            confirm: Confirmation::default(),
        }
    }

    pub fn hook(&self) -> &BookHook {
        &self.hook
    }

    pub fn reviews(&self) -> &ReviewListView {
        &self.reviews
    }

    /// Load the book, then its reviews once the book is known.
    pub fn load<T: Transport>(&mut self, catalog: &Catalog<T>) -> bool {
        let fetched = self.hook.sync_and_run(catalog, self.book_id, 0);
        if self.hook.data().is_some() {
            return self.reviews.load(catalog) || fetched;
        }
        fetched
    }

    /// Ask to delete the book. Ignored until the book has loaded.
    pub fn request_delete(&mut self) -> bool {
        match self.hook.data() {
            Some(book) => {
                self.confirm.request(book.id, DELETE_BOOK_WITH_REVIEWS_PROMPT);
                true
            }
            None => false,
        }
    }

    pub fn pending_prompt(&self) -> Option<&'static str> {
        self.confirm.prompt()
    }

    pub fn cancel_delete(&mut self) {
        self.confirm.cancel();
    }

    pub fn confirm_delete<T: Transport>(&mut self, catalog: &Catalog<T>) -> ActionOutcome {
        let Some(id) = self.confirm.accept() else {
            return ActionOutcome::NothingPending;
        };
        match catalog.delete_book(id) {
            Ok(()) => ActionOutcome::Navigate(Route::Home),
            Err(err) => {
                error!(book_id = id, error = %err, "failed to delete book");
                ActionOutcome::Alert(DELETE_BOOK_FAILED)
            }
        }
    }

    pub fn render(&self) -> String {
        if self.hook.loading() {
            return "Loading book details...\n".to_string();
        }
        if let Some(error) = self.hook.error() {
            return format!("Error: {error}\n");
        }
        let Some(book) = self.hook.data() else {
            return "Book not found\n".to_string();
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", book.title);
        let _ = writeln!(out, "by {}", book.author);
        if let Some(year) = book.publication_year {
            let _ = writeln!(out, "{year}");
        }
        if let Some(isbn) = &book.isbn {
            let _ = writeln!(out, "ISBN: {isbn}");
        }
        let description = book
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description provided.");
        let _ = writeln!(out, "{description}");
        let _ = writeln!(out);
        out.push_str(&self.reviews.render());
        out
    }
}
