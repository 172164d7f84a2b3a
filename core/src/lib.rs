//! Synchronous API client core for the book catalogue service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `Catalog` binds the client
//! to an injected `Transport`; the fetch hooks layer loading/error/data state
//! and refresh semantics on top, and `pagination` holds the page arithmetic
//! shared with list views.
//!
//! # Design
//! - `CatalogClient` is stateless: it holds only the API root and headers.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Fetch hooks tag every cycle with a sequence number and only commit the
//!   latest one.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod catalog;
pub mod client;
pub mod error;
pub mod fetch;
pub mod http;
pub mod pagination;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;
pub mod validation;

pub use catalog::Catalog;
pub use client::CatalogClient;
pub use error::ApiError;
pub use fetch::{
    BookHook, BooksHook, Endpoint, FetchHook, FetchState, FetchStatus, FetchTicket, GetBook, ListBooks,
    ListReviews, ReviewsHook, ReviewsQuery,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use pagination::{PageNav, Pagination, PaginationParams};
pub use types::{Book, BookFormData, BookId, BookWithReviews, Review, ReviewFormData, ReviewId};
pub use validation::ValidationError;
