//! Review command implementations

use anyhow::{Context, Result};
use bookshelf_core::{BookId, ReviewFormData, ReviewId};
use clap::Args;

use crate::views::{ReviewFormView, ReviewListView};

use super::{confirm, finish_action, saved, Session};

/// Review form fields. On edit, only the fields given are changed.
#[derive(Debug, Clone, Default, Args)]
pub struct ReviewFields {
    /// Reviewer name
    #[arg(long)]
    pub name: Option<String>,

    /// Rating from 1 to 5
    #[arg(long)]
    pub rating: Option<u8>,

    /// Optional comment
    #[arg(long)]
    pub comment: Option<String>,
}

impl ReviewFields {
    fn apply(self, data: &mut ReviewFormData) {
        if let Some(name) = self.name {
            data.reviewer_name = name;
        }
        if let Some(rating) = self.rating {
            data.rating = rating;
        }
        if let Some(comment) = self.comment {
            data.comment = Some(comment);
        }
    }
}

pub fn add_review(session: &Session, book_id: BookId, fields: ReviewFields) -> Result<()> {
    let mut list = ReviewListView::new(book_id, session.page_size);
    list.open_add_form();
    if let Some(form) = list.form_mut() {
        fields.apply(form.data_mut());
    }
    let submission = list
        .submit_form(&session.catalog)
        .context("review form is not open")?;
    let review = saved(submission)?;
    println!("Added review #{} to book #{book_id}", review.id);
    Ok(())
}

pub fn edit_review(session: &Session, id: ReviewId, fields: ReviewFields) -> Result<()> {
    let review = session
        .catalog
        .get_review(id)
        .with_context(|| format!("failed to fetch review #{id}"))?;
    let mut form = ReviewFormView::edit(&review);
    fields.apply(form.data_mut());
    let review = saved(form.submit(&session.catalog))?;
    println!("Updated review #{}", review.id);
    Ok(())
}

/// Deletes from the owning book's review list, so the list reloads the same
/// way it does after a delete on the detail page.
pub fn delete_review(session: &Session, id: ReviewId, assume_yes: bool) -> Result<()> {
    let review = session
        .catalog
        .get_review(id)
        .with_context(|| format!("failed to fetch review #{id}"))?;
    let mut list = ReviewListView::new(review.book_id, session.page_size);
    list.load(&session.catalog);
    list.request_delete(id);

    let prompt = list.pending_prompt().unwrap_or_default();
    if !confirm(prompt, assume_yes)? {
        list.cancel_delete();
        println!("Cancelled");
        return Ok(());
    }
    finish_action(list.confirm_delete(&session.catalog))?;
    println!("Deleted review #{id}");
    Ok(())
}
