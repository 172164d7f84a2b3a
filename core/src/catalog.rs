//! Resource access functions: one method per API operation, each performing
//! exactly one network call through the injected transport.

use tracing::{debug, info};

use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::pagination::PaginationParams;
use crate::types::{Book, BookFormData, BookId, BookWithReviews, Review, ReviewFormData, ReviewId};

/// A `CatalogClient` bound to the transport that executes its requests.
///
/// Constructed once by the host and passed by reference to hooks and views.
/// No retries, caching, or batching: a failed call is returned as-is.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    client: CatalogClient,
    transport: T,
}

impl<T: Transport> Catalog<T> {
    pub fn new(client: CatalogClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one request through the transport.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.full_url(), "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }

    pub fn list_books(&self, params: PaginationParams) -> Result<Vec<Book>, ApiError> {
        let response = self.execute(&self.client.build_list_books(params))?;
        self.client.parse_list_books(response)
    }

    pub fn get_book(&self, id: BookId) -> Result<Book, ApiError> {
        let response = self.execute(&self.client.build_get_book(id))?;
        self.client.parse_get_book(response)
    }

    pub fn create_book(&self, input: &BookFormData) -> Result<Book, ApiError> {
        input.validate()?;
        let response = self.execute(&self.client.build_create_book(input)?)?;
        let book = self.client.parse_create_book(response)?;
        info!(book_id = book.id, title = %book.title, "created book");
        Ok(book)
    }

    pub fn update_book(&self, id: BookId, input: &BookFormData) -> Result<Book, ApiError> {
        input.validate()?;
        let response = self.execute(&self.client.build_update_book(id, input)?)?;
        let book = self.client.parse_update_book(response)?;
        info!(book_id = book.id, "updated book");
        Ok(book)
    }

    /// Deleting a book removes its reviews on the server as well.
    pub fn delete_book(&self, id: BookId) -> Result<(), ApiError> {
        let response = self.execute(&self.client.build_delete_book(id))?;
        self.client.parse_delete_book(response)?;
        info!(book_id = id, "deleted book");
        Ok(())
    }

    pub fn list_reviews(&self, book_id: BookId, params: PaginationParams) -> Result<BookWithReviews, ApiError> {
        let response = self.execute(&self.client.build_list_reviews(book_id, params))?;
        self.client.parse_list_reviews(response)
    }

    pub fn get_review(&self, id: ReviewId) -> Result<Review, ApiError> {
        let response = self.execute(&self.client.build_get_review(id))?;
        self.client.parse_get_review(response)
    }

    pub fn create_review(&self, book_id: BookId, input: &ReviewFormData) -> Result<Review, ApiError> {
        input.validate()?;
        let response = self.execute(&self.client.build_create_review(book_id, input)?)?;
        let review = self.client.parse_create_review(response)?;
        info!(book_id, review_id = review.id, "created review");
        Ok(review)
    }

    pub fn update_review(&self, id: ReviewId, input: &ReviewFormData) -> Result<Review, ApiError> {
        input.validate()?;
        let response = self.execute(&self.client.build_update_review(id, input)?)?;
        let review = self.client.parse_update_review(response)?;
        info!(review_id = review.id, "updated review");
        Ok(review)
    }

    pub fn delete_review(&self, id: ReviewId) -> Result<(), ApiError> {
        let response = self.execute(&self.client.build_delete_review(id))?;
        self.client.parse_delete_review(response)?;
        info!(review_id = id, "deleted review");
        Ok(())
    }
}
