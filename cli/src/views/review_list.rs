use std::fmt::Write;

use tracing::error;

use bookshelf_core::{
    BookId, Catalog, PageNav, Pagination, PaginationParams, Review, ReviewId, ReviewsHook, ReviewsQuery, Transport,
};

use super::confirm::Confirmation;
use super::render;
use super::review_form::ReviewFormView;
use super::{ActionOutcome, Submission};

pub const DELETE_REVIEW_PROMPT: &str = "Are you sure you want to delete this review?";
pub const DELETE_REVIEW_FAILED: &str = "Failed to delete review. Please try again.";

/// The reviews section of a book's detail page.
///
/// Any successful create, update or delete bumps `refresh_key`, which is
/// part of the hook's key, so the next `load` fetches again even though the
/// page did not change.
#[derive(Debug)]
pub struct ReviewListView {
    book_id: BookId,
    page: u32,
    page_size: u32,
    refresh_key: u64,
    hook: ReviewsHook,
    form: Option<ReviewFormView>,
    confirm: Confirmation<ReviewId>,
}

impl ReviewListView {
    pub fn new(book_id: BookId, page_size: u32) -> Self {
        Self::with_page(book_id, page_size, 1)
    }

    /// Starts on `page`, so the first load already asks for it.
    pub fn with_page(book_id: BookId, page_size: u32, page: u32) -> Self {
        let query = ReviewsQuery {
            book_id,
            page: PaginationParams::for_page(page, page_size),
        };
        Self {
            book_id,
            page,
            page_size,
            refresh_key: 0,
            hook: ReviewsHook::new(query),
            form: None,
            confirm: Confirmation::default(),
        }
    }

    pub fn query(&self) -> ReviewsQuery {
        ReviewsQuery {
            book_id: self.book_id,
            page: PaginationParams::for_page(self.page, self.page_size),
        }
    }

    pub fn hook(&self) -> &ReviewsHook {
        &self.hook
    }

    pub fn refresh_key(&self) -> u64 {
        self.refresh_key
    }

    /// Fetch if the page or refresh key changed since the last load.
    pub fn load<T: Transport>(&mut self, catalog: &Catalog<T>) -> bool {
        let query = self.query();
        self.hook.sync_and_run(catalog, query, self.refresh_key)
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

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.hook.total() as u64, self.page_size)
    }

    fn bump(&mut self) {
        self.refresh_key += 1;
    }

    pub fn open_add_form(&mut self) {
        self.form = Some(ReviewFormView::new_review(self.book_id));
    }

    /// Open the form prefilled from a loaded review. Returns `false` when
    /// no such review is on the current page.
    pub fn open_edit_form(&mut self, id: ReviewId) -> bool {
        match self.hook.reviews().iter().find(|review| review.id == id) {
            Some(review) => {
                self.form = Some(ReviewFormView::edit(review));
                true
            }
            None => false,
        }
    }

    pub fn form(&self) -> Option<&ReviewFormView> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ReviewFormView> {
        self.form.as_mut()
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form. On success the form closes and the list
    /// reloads; otherwise the form stays open with its error.
    pub fn submit_form<T: Transport>(&mut self, catalog: &Catalog<T>) -> Option<Submission<Review>> {
        let outcome = self.form.as_mut()?.submit(catalog);
        if matches!(outcome, Submission::Saved { .. }) {
            self.form = None;
            self.bump();
            self.load(catalog);
        }
        Some(outcome)
    }

    pub fn request_delete(&mut self, id: ReviewId) {
        self.confirm.request(id, DELETE_REVIEW_PROMPT);
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
        match catalog.delete_review(id) {
            Ok(()) => {
                self.bump();
                self.load(catalog);
                ActionOutcome::Done
            }
            Err(err) => {
                error!(review_id = id, error = %err, "failed to delete review");
                ActionOutcome::Alert(DELETE_REVIEW_FAILED)
            }
        }
    }

    pub fn render(&self) -> String {
        if self.hook.loading() {
            return "Loading reviews...\n".to_string();
        }
        if let Some(error) = self.hook.error() {
            return format!("Error: {error}\n");
        }

        let reviews = self.hook.reviews();
        let mut out = String::new();
        let _ = writeln!(out, "Reviews ({})", reviews.len());
        if let Some(form) = &self.form {
            for line in form.render().lines() {
                let _ = writeln!(out, "  {line}");
            }
        }

        if reviews.is_empty() {
            let _ = writeln!(out, "  No reviews yet");
            let _ = writeln!(out, "  Be the first to share your thoughts about this book!");
            return out;
        }

        for review in reviews {
            let _ = writeln!(out, "  #{} {}  {}", review.id, review.reviewer_name, render::stars(review.rating));
            if let Some(comment) = review.comment.as_deref().filter(|c| !c.is_empty()) {
                let _ = writeln!(out, "     {comment}");
            }
            let mut dates = render::date(&review.created_at);
            if let Some(updated) = review.updated_at.filter(|_| review.is_edited()) {
                let _ = write!(dates, " (edited {})", render::date(&updated));
            }
            let _ = writeln!(out, "     {dates}");
        }
        let _ = writeln!(out, "  {}", render::pagination_bar(&self.pagination()));
        out
    }
}
