//! Plain-text formatting shared by the views.

use chrono::{DateTime, Utc};

use bookshelf_core::Pagination;

pub const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// `★★★☆☆ (3/5)`
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{} ({rating}/5)", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `1 book`, `2 books`
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn date(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// `Page 2 of 4   ‹ 1 [2] 3 4 ›`; arrows appear only when enabled.
pub fn pagination_bar(pagination: &Pagination) -> String {
    let pages: Vec<String> = pagination
        .pages()
        .into_iter()
        .map(|page| {
            if page == pagination.current_page() {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    let prev = if pagination.has_previous() { "‹ " } else { "" };
    let next = if pagination.has_next() { " ›" } else { "" };
    format!(
        "Page {} of {}   {prev}{}{next}",
        pagination.current_page(),
        pagination.total_pages(),
        pages.join(" ")
    )
}
