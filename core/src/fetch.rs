//! Data-fetching hooks: loading/error/data state kept current for a query.
//!
//! # Design
//! A `FetchHook` owns the state for one query and decides *when* to fetch;
//! it never performs I/O on its own. Starting a cycle hands back a
//! `FetchTicket` carrying the request and a sequence number. The caller
//! executes the request however it likes (inline through `FetchHook::run`,
//! or on another task) and returns the outcome through `complete`.
//!
//! Only the most recently started cycle may commit. A ticket whose sequence
//! number has been superseded is discarded on completion, so a slow response
//! to an old query can never overwrite the state of a newer one.
//!
//! Failures surface as a fixed, operation-specific message; the underlying
//! error is logged and dropped. Previously fetched data survives a failure.

use std::fmt;

use tracing::{debug, error};

use crate::catalog::Catalog;
use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::pagination::PaginationParams;
use crate::types::{Book, BookId, BookWithReviews, Review};

/// One fetchable API operation.
pub trait Endpoint {
    /// Value-compared identity of what is being fetched.
    type Query: Clone + PartialEq + fmt::Debug;
    type Output;

    /// The only error text a hook ever exposes for this endpoint.
    const FAILURE_MESSAGE: &'static str;

    /// Whether `query` identifies something fetchable. A disabled query
    /// suppresses fetching entirely and leaves the hook pending.
    fn is_enabled(_query: &Self::Query) -> bool {
        true
    }

    fn build(client: &CatalogClient, query: &Self::Query) -> HttpRequest;

    fn parse(client: &CatalogClient, response: HttpResponse) -> Result<Self::Output, ApiError>;
}

/// A page of the book list.
#[derive(Debug)]
pub struct ListBooks;

impl Endpoint for ListBooks {
    type Query = PaginationParams;
    type Output = Vec<Book>;

    const FAILURE_MESSAGE: &'static str = "Failed to fetch books";

    fn build(client: &CatalogClient, query: &PaginationParams) -> HttpRequest {
        client.build_list_books(*query)
    }

    fn parse(client: &CatalogClient, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        client.parse_list_books(response)
    }
}

/// A single book by id. Id 0 is treated as "no book selected".
#[derive(Debug)]
pub struct GetBook;

impl Endpoint for GetBook {
    type Query = BookId;
    type Output = Book;

    const FAILURE_MESSAGE: &'static str = "Failed to fetch book details";

    fn is_enabled(query: &BookId) -> bool {
        *query != 0
    }

    fn build(client: &CatalogClient, query: &BookId) -> HttpRequest {
        client.build_get_book(*query)
    }

    fn parse(client: &CatalogClient, response: HttpResponse) -> Result<Book, ApiError> {
        client.parse_get_book(response)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewsQuery {
    pub book_id: BookId,
    pub page: PaginationParams,
}

/// A page of one book's reviews, delivered embedded in the book.
#[derive(Debug)]
pub struct ListReviews;

impl Endpoint for ListReviews {
    type Query = ReviewsQuery;
    type Output = BookWithReviews;

    const FAILURE_MESSAGE: &'static str = "Failed to fetch reviews";

    fn is_enabled(query: &ReviewsQuery) -> bool {
        query.book_id != 0
    }

    fn build(client: &CatalogClient, query: &ReviewsQuery) -> HttpRequest {
        client.build_list_reviews(query.book_id, query.page)
    }

    fn parse(client: &CatalogClient, response: HttpResponse) -> Result<BookWithReviews, ApiError> {
        client.parse_list_reviews(response)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Pending,
    Ready,
    Failed(String),
}

/// Status plus whatever data the last successful cycle produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    status: FetchStatus,
    data: Option<T>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Pending,
            data: None,
        }
    }
}

impl<T> FetchState<T> {
    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn loading(&self) -> bool {
        self.status == FetchStatus::Pending
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

/// Proof that a fetch cycle was started; redeem it with `FetchHook::complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    request: HttpRequest,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

pub struct FetchHook<E: Endpoint> {
    query: E::Query,
    refresh: u64,
    last_started: Option<(E::Query, u64)>,
    issued: u64,
    state: FetchState<E::Output>,
}

impl<E: Endpoint> fmt::Debug for FetchHook<E>
where
    E::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchHook")
            .field("query", &self.query)
            .field("refresh", &self.refresh)
            .field("issued", &self.issued)
            .field("state", &self.state)
            .finish()
    }
}

impl<E: Endpoint> FetchHook<E> {
    /// A hook in its initial pending state. Nothing is fetched until
    /// `sync` or `refetch` is called.
    pub fn new(query: E::Query) -> Self {
        Self {
            query,
            refresh: 0,
            last_started: None,
            issued: 0,
            state: FetchState::default(),
        }
    }

    pub fn query(&self) -> &E::Query {
        &self.query
    }

    pub fn state(&self) -> &FetchState<E::Output> {
        &self.state
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn data(&self) -> Option<&E::Output> {
        self.state.data()
    }

    /// Sequence number of the most recently started cycle, 0 if none.
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Adopt `query` and `refresh`, starting a cycle if either differs by
    /// value from the last started cycle.
    pub fn sync(&mut self, client: &CatalogClient, query: E::Query, refresh: u64) -> Option<FetchTicket> {
        self.query = query;
        self.refresh = refresh;
        if !E::is_enabled(&self.query) {
            debug!(query = ?self.query, "fetch suppressed for disabled query");
            return None;
        }
        let key = (self.query.clone(), self.refresh);
        if self.last_started.as_ref() == Some(&key) {
            return None;
        }
        self.last_started = Some(key);
        Some(self.begin(client))
    }

    /// Start a cycle for the current query regardless of whether anything
    /// changed.
    pub fn refetch(&mut self, client: &CatalogClient) -> Option<FetchTicket> {
        if !E::is_enabled(&self.query) {
            debug!(query = ?self.query, "refetch suppressed for disabled query");
            return None;
        }
        self.last_started = Some((self.query.clone(), self.refresh));
        Some(self.begin(client))
    }

    fn begin(&mut self, client: &CatalogClient) -> FetchTicket {
        self.issued += 1;
        self.state.status = FetchStatus::Pending;
        debug!(seq = self.issued, query = ?self.query, "fetch started");
        FetchTicket {
            seq: self.issued,
            request: E::build(client, &self.query),
        }
    }

    /// Commit the outcome of `ticket`'s request. Returns `false` and leaves
    /// the state untouched when a newer cycle has been started since.
    pub fn complete(
        &mut self,
        client: &CatalogClient,
        ticket: FetchTicket,
        outcome: Result<HttpResponse, ApiError>,
    ) -> bool {
        if ticket.seq != self.issued {
            debug!(seq = ticket.seq, latest = self.issued, "discarding superseded fetch result");
            return false;
        }
        match outcome.and_then(|response| E::parse(client, response)) {
            Ok(output) => {
                self.state.data = Some(output);
                self.state.status = FetchStatus::Ready;
                debug!(seq = ticket.seq, "fetch committed");
            }
            Err(err) => {
                error!(seq = ticket.seq, error = %err, "{}", E::FAILURE_MESSAGE);
                self.state.status = FetchStatus::Failed(E::FAILURE_MESSAGE.to_string());
            }
        }
        true
    }

    /// Execute `ticket` through `catalog` and commit the outcome.
    pub fn run<T: Transport>(&mut self, catalog: &Catalog<T>, ticket: FetchTicket) -> bool {
        let outcome = catalog.execute(ticket.request());
        self.complete(catalog.client(), ticket, outcome)
    }

    /// `sync` followed by an inline `run` when a cycle starts.
    pub fn sync_and_run<T: Transport>(&mut self, catalog: &Catalog<T>, query: E::Query, refresh: u64) -> bool {
        match self.sync(catalog.client(), query, refresh) {
            Some(ticket) => self.run(catalog, ticket),
            None => false,
        }
    }

    /// `refetch` followed by an inline `run`.
    pub fn refetch_and_run<T: Transport>(&mut self, catalog: &Catalog<T>) -> bool {
        match self.refetch(catalog.client()) {
            Some(ticket) => self.run(catalog, ticket),
            None => false,
        }
    }
}

pub type BooksHook = FetchHook<ListBooks>;
pub type BookHook = FetchHook<GetBook>;
pub type ReviewsHook = FetchHook<ListReviews>;

impl FetchHook<ListBooks> {
    pub fn books(&self) -> &[Book] {
        self.data().map(Vec::as_slice).unwrap_or_default()
    }
}

impl FetchHook<ListReviews> {
    pub fn reviews(&self) -> &[Review] {
        self.data().map(|page| page.reviews.as_slice()).unwrap_or_default()
    }

    /// Length of the collection the server returned for the current page.
    ///
    /// The review endpoint carries no separate count, so this is not a
    /// server-side total: it equals the true total only when the server
    /// returns every review in one collection.
    pub fn total(&self) -> usize {
        self.reviews().len()
    }
}

#[cfg(test)]
mod scenarios;
