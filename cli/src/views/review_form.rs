use std::fmt::Write;

use tracing::error;

use bookshelf_core::{ApiError, BookId, Catalog, Review, ReviewFormData, ReviewId, Transport};

use super::Submission;

pub const SAVE_REVIEW_FAILED: &str = "Failed to save review. Please try again.";

/// Add/edit form for a single review.
#[derive(Debug, Clone)]
pub struct ReviewFormView {
    book_id: BookId,
    editing: Option<ReviewId>,
    data: ReviewFormData,
    error: Option<String>,
}

impl ReviewFormView {
    pub fn new_review(book_id: BookId) -> Self {
        Self {
            book_id,
            editing: None,
            data: ReviewFormData::default(),
            error: None,
        }
    }

    /// A form prefilled from `review`.
    pub fn edit(review: &Review) -> Self {
        Self {
            book_id: review.book_id,
            editing: Some(review.id),
            data: ReviewFormData {
                reviewer_name: review.reviewer_name.clone(),
                rating: review.rating,
                comment: review.comment.clone(),
            },
            error: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn data(&self) -> &ReviewFormData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ReviewFormData {
        &mut self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit<T: Transport>(&mut self, catalog: &Catalog<T>) -> Submission<Review> {
        self.error = None;

        let mut payload = self.data.clone();
        payload.comment = payload.comment.filter(|c| !c.trim().is_empty());

        let result = match self.editing {
            Some(id) => catalog.update_review(id, &payload),
            None => catalog.create_review(self.book_id, &payload),
        };

        match result {
            Ok(review) => Submission::Saved {
                value: review,
                navigate: None,
            },
            Err(ApiError::Validation(reason)) => {
                self.error = Some(reason.to_string());
                Submission::Rejected(reason)
            }
            Err(err) => {
                error!(book_id = self.book_id, error = %err, "failed to save review");
                self.error = Some(SAVE_REVIEW_FAILED.to_string());
                Submission::Failed(SAVE_REVIEW_FAILED)
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let title = if self.is_editing() { "Edit Review" } else { "Add Review" };
        let _ = writeln!(out, "{title}");
        if let Some(error) = &self.error {
            let _ = writeln!(out, "  ! {error}");
        }
        let _ = writeln!(out, "  Your Name *: {}", self.data.reviewer_name);
        let _ = writeln!(out, "  Rating *: {}", self.data.rating);
        let _ = writeln!(out, "  Comment: {}", self.data.comment.as_deref().unwrap_or(""));
        out
    }
}
