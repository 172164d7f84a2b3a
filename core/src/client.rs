//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only the API root and default headers, and carries
//! no mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. `Catalog` pairs the two with a transport; the fetch
//! hooks use them separately so a response can be matched to the request
//! that produced it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::pagination::PaginationParams;
use crate::types::{Book, BookFormData, BookId, BookWithReviews, Review, ReviewFormData, ReviewId};

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Books
    // -----------------------------------------------------------------------

    pub fn build_list_books(&self, params: PaginationParams) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, "/books");
        req.query = pagination_query(params);
        req
    }

    pub fn build_get_book(&self, id: BookId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/books/{id}"))
    }

    pub fn build_create_book(&self, input: &BookFormData) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/books", input)
    }

    pub fn build_update_book(&self, id: BookId, input: &BookFormData) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/books/{id}"), input)
    }

    pub fn build_delete_book(&self, id: BookId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/books/{id}"))
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_book(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    // -----------------------------------------------------------------------
    // Reviews
    // -----------------------------------------------------------------------

    pub fn build_list_reviews(&self, book_id: BookId, params: PaginationParams) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, &format!("/books/{book_id}/reviews"));
        req.query = pagination_query(params);
        req
    }

    pub fn build_get_review(&self, id: ReviewId) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/books/reviews/{id}"))
    }

    pub fn build_create_review(&self, book_id: BookId, input: &ReviewFormData) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, &format!("/books/{book_id}/reviews"), input)
    }

    pub fn build_update_review(&self, id: ReviewId, input: &ReviewFormData) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/books/reviews/{id}"), input)
    }

    pub fn build_delete_review(&self, id: ReviewId) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/books/reviews/{id}"))
    }

    pub fn parse_list_reviews(&self, response: HttpResponse) -> Result<BookWithReviews, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_get_review(&self, response: HttpResponse) -> Result<Review, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_review(&self, response: HttpResponse) -> Result<Review, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_review(&self, response: HttpResponse) -> Result<Review, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_review(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: self.headers.clone(),
            body: None,
        }
    }

    fn json_request<B: Serialize>(&self, method: HttpMethod, path: &str, input: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialize(e.to_string()))?;
        let mut req = self.request(method, path);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

fn pagination_query(params: PaginationParams) -> Vec<(String, String)> {
    vec![
        ("skip".to_string(), params.skip.to_string()),
        ("limit".to_string(), params.limit.to_string()),
    ]
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialize(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
