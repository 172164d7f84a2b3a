//! Book command implementations

use anyhow::{bail, Result};
use bookshelf_core::BookId;
use clap::Args;

use crate::views::{BookDetailView, BookDraft, BookFormView, EditBookPage};

use super::{confirm, finish_action, saved, Session};

/// Book form fields. On edit, only the fields given are changed.
#[derive(Debug, Clone, Default, Args)]
pub struct BookFields {
    /// Book title
    #[arg(long)]
    pub title: Option<String>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// ISBN-10 or ISBN-13
    #[arg(long)]
    pub isbn: Option<String>,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Publication year
    #[arg(long)]
    pub year: Option<i32>,
}

impl BookFields {
    fn apply(self, draft: &mut BookDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(author) = self.author {
            draft.author = author;
        }
        if let Some(isbn) = self.isbn {
            draft.isbn = isbn;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(year) = self.year {
            draft.publication_year = year;
        }
    }
}

pub fn add_book(session: &Session, fields: BookFields) -> Result<()> {
    let mut form = BookFormView::new();
    fields.apply(form.draft_mut());
    let book = saved(form.submit(&session.catalog))?;
    println!("Created book #{}: {}", book.id, book.title);
    Ok(())
}

pub fn edit_book(session: &Session, id: BookId, fields: BookFields) -> Result<()> {
    let mut page = EditBookPage::new(id);
    page.load(&session.catalog);
    let shown = page.render();
    let Some(form) = page.form_mut() else {
        bail!("{}", shown.trim_end());
    };
    fields.apply(form.draft_mut());
    let book = saved(form.submit(&session.catalog))?;
    println!("Updated book #{}: {}", book.id, book.title);
    Ok(())
}

pub fn delete_book(session: &Session, id: BookId, assume_yes: bool) -> Result<()> {
    let mut view = BookDetailView::new(id, session.page_size);
    view.load(&session.catalog);
    if !view.request_delete() {
        bail!("{}", view.render().trim_end());
    }

    let prompt = view.pending_prompt().unwrap_or_default();
    if !confirm(prompt, assume_yes)? {
        view.cancel_delete();
        println!("Cancelled");
        return Ok(());
    }
    finish_action(view.confirm_delete(&session.catalog))?;
    println!("Deleted book #{id}");
    Ok(())
}
