use std::fmt::Write;

use tracing::error;

use bookshelf_core::{BookId, BooksHook, Catalog, PageNav, Pagination, PaginationParams, Transport};

use super::confirm::Confirmation;
use super::render;
use super::ActionOutcome;

pub const DELETE_BOOK_PROMPT: &str = "Are you sure you want to delete this book?";
pub const DELETE_BOOK_FAILED: &str = "Failed to delete book. Please try again.";

/// The home page: one page of books plus pagination and delete.
#[derive(Debug)]
pub struct BookListView {
    page: u32,
    page_size: u32,
    hook: BooksHook,
    confirm: Confirmation<BookId>,
}

impl BookListView {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            hook: BooksHook::new(PaginationParams::for_page(1, page_size)),
            confirm: Confirmation::default(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn params(&self) -> PaginationParams {
        PaginationParams::for_page(self.page, self.page_size)
    }

    pub fn hook(&self) -> &BooksHook {
        &self.hook
    }

    pub fn load<T: Transport>(&mut self, catalog: &Catalog<T>) -> bool {
        let params = self.params();
        self.hook.sync_and_run(catalog, params, 0)
    }

    pub fn on_page_change<T: Transport>(&mut self, catalog: &Catalog<T>, page: u32) -> bool {
        self.page = page;
        self.load(catalog)
    }

    pub fn navigate<T: Transport>(&mut self, catalog: &Catalog<T>, nav: PageNav) -> bool {
        match self.pagination().target(nav) {
            Some(page) => self.on_page_change(catalog, page),
            None => false,
        }
    }

    /// Re-run the current page, e.g. from the error state's retry action.
    pub fn retry<T: Transport>(&mut self, catalog: &Catalog<T>) -> bool {
        self.hook.refetch_and_run(catalog)
    }

    /// The list endpoint returns no count, so the total is estimated from
    /// what this page holds: a full page implies at least one more.
    pub fn estimated_total(&self) -> u64 {
        let params = self.params();
        let count = self.hook.books().len() as u64;
        let mut total = u64::from(params.skip) + count;
        if count > 0 && count == u64::from(params.limit) {
            total += u64::from(params.limit);
        }
        total
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.estimated_total(), self.page_size)
    }

    pub fn request_delete(&mut self, id: BookId) {
        self.confirm.request(id, DELETE_BOOK_PROMPT);
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
            Ok(()) => {
                self.retry(catalog);
                ActionOutcome::Done
            }
            Err(err) => {
                error!(book_id = id, error = %err, "failed to delete book");
                ActionOutcome::Alert(DELETE_BOOK_FAILED)
            }
        }
    }

    pub fn render(&self) -> String {
        if self.hook.loading() {
            return "Loading books...\n".to_string();
        }
        if let Some(error) = self.hook.error() {
            return format!("Error: {error}\n");
        }

        let books = self.hook.books();
        let mut out = String::new();
        let _ = writeln!(out, "Books ({} found)", render::plural(books.len(), "book"));
        if books.is_empty() {
            let _ = writeln!(out, "  No books found");
            let _ = writeln!(out, "  Start by adding your first book to the collection.");
            return out;
        }

        for book in books {
            let _ = writeln!(out, "  #{} {} by {}", book.id, book.title, book.author);
            if let Some(year) = book.publication_year {
                let _ = writeln!(out, "     Published: {year}");
            }
            if let Some(isbn) = &book.isbn {
                let _ = writeln!(out, "     ISBN: {isbn}");
            }
            if let Some(description) = book.description.as_deref().filter(|d| !d.is_empty()) {
                let _ = writeln!(
                    out,
                    "     {}",
                    render::truncate(description, render::DESCRIPTION_PREVIEW_CHARS)
                );
            }
            let _ = writeln!(out, "     Added: {}", render::date(&book.created_at));
        }
        let _ = writeln!(out, "  {}", render::pagination_bar(&self.pagination()));
        out
    }
}
