//! Page and component state machines.
//!
//! Each view owns its fetch hooks and local state, takes the injected
//! `Catalog` for anything that touches the API, and renders itself to plain
//! text. Destructive actions go through `Confirmation` instead of a blocking
//! dialog, so every step is driveable from tests.

pub mod book_detail;
pub mod book_form;
pub mod book_list;
pub mod confirm;
pub mod page;
pub mod render;
pub mod review_form;
pub mod review_list;

pub use book_detail::BookDetailView;
pub use book_form::{BookDraft, BookFormView};
pub use book_list::BookListView;
pub use page::{EditBookPage, Page};
pub use review_form::ReviewFormView;
pub use review_list::ReviewListView;

use bookshelf_core::ValidationError;

use crate::router::Route;

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// Saved; `navigate` is where the page should go next, if anywhere.
    Saved { value: T, navigate: Option<Route> },
    /// Rejected client-side; nothing was sent.
    Rejected(ValidationError),
    /// The API call failed; the message is what the user sees.
    Failed(&'static str),
}

/// Result of confirming a pending destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Done; the view has refreshed itself.
    Done,
    /// Done; the page should move to this route.
    Navigate(Route),
    /// Failed; show this message and stay put.
    Alert(&'static str),
    /// There was nothing awaiting confirmation.
    NothingPending,
}
