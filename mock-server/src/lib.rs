use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub book_id: i64,
    pub reviewer_name: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `GET /books/{id}/reviews`: the book with every review attached.
/// The embedded collection is not paginated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookWithReviews {
    #[serde(flatten)]
    pub book: Book,
    pub reviews: Vec<Review>,
}

#[derive(Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
}

/// Partial update: fields absent from the JSON are left unchanged.
#[derive(Deserialize)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateReview {
    pub reviewer_name: String,
    pub rating: i64,
    pub comment: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateReview {
    pub reviewer_name: Option<String>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Default)]
pub struct Store {
    books: BTreeMap<i64, Book>,
    reviews: BTreeMap<i64, Review>,
    last_book_id: i64,
    last_review_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

/// Error response carrying a `{"detail": ...}` body.
#[derive(Debug)]
pub struct Failure(StatusCode, &'static str);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "detail": self.1 }))).into_response()
    }
}

const BOOK_NOT_FOUND: Failure = Failure(StatusCode::NOT_FOUND, "Book not found");
const REVIEW_NOT_FOUND: Failure = Failure(StatusCode::NOT_FOUND, "Review not found");

/// Where the resource routes are mounted; `/health` stays at the root.
pub const API_PREFIX: &str = "/api/v1";

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    let api = Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book).put(update_book).delete(delete_book))
        .route("/books/{id}/reviews", get(list_reviews).post(create_review))
        .route(
            "/books/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        );
    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn list_books(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Book>>, Failure> {
    if !(1..=100).contains(&params.limit) {
        return Err(Failure(StatusCode::UNPROCESSABLE_ENTITY, "limit must be between 1 and 100"));
    }
    let store = db.read().await;
    let books = store
        .books
        .values()
        .skip(params.skip)
        .take(params.limit)
        .cloned()
        .collect();
    Ok(Json(books))
}

async fn create_book(
    State(db): State<Db>,
    Json(input): Json<CreateBook>,
) -> Result<(StatusCode, Json<Book>), Failure> {
    require_text(&input.title)?;
    require_text(&input.author)?;
    validate_isbn(input.isbn.as_deref())?;
    validate_year(input.publication_year)?;

    let mut store = db.write().await;
    store.ensure_isbn_free(input.isbn.as_deref(), None)?;
    store.last_book_id += 1;
    let book = Book {
        id: store.last_book_id,
        title: input.title,
        author: input.author,
        isbn: input.isbn,
        description: input.description,
        publication_year: input.publication_year,
        created_at: Utc::now(),
        updated_at: None,
    };
    store.books.insert(book.id, book.clone());
    tracing::debug!(book_id = book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn get_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Book>, Failure> {
    let store = db.read().await;
    store.books.get(&id).cloned().map(Json).ok_or(BOOK_NOT_FOUND)
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateBook>,
) -> Result<Json<Book>, Failure> {
    let mut store = db.write().await;
    if !store.books.contains_key(&id) {
        return Err(BOOK_NOT_FOUND);
    }
    if let Some(title) = &input.title {
        require_text(title)?;
    }
    if let Some(author) = &input.author {
        require_text(author)?;
    }
    validate_isbn(input.isbn.as_deref())?;
    validate_year(input.publication_year)?;
    store.ensure_isbn_free(input.isbn.as_deref(), Some(id))?;

    let book = store.books.get_mut(&id).ok_or(BOOK_NOT_FOUND)?;
    if let Some(title) = input.title {
        book.title = title;
    }
    if let Some(author) = input.author {
        book.author = author;
    }
    if let Some(isbn) = input.isbn {
        book.isbn = Some(isbn);
    }
    if let Some(description) = input.description {
        book.description = Some(description);
    }
    if let Some(year) = input.publication_year {
        book.publication_year = Some(year);
    }
    book.updated_at = Some(Utc::now());
    Ok(Json(book.clone()))
}

/// Removes the book and every review attached to it.
async fn delete_book(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Failure> {
    let mut store = db.write().await;
    store.books.remove(&id).ok_or(BOOK_NOT_FOUND)?;
    store.reviews.retain(|_, review| review.book_id != id);
    Ok(StatusCode::NO_CONTENT)
}

async fn list_reviews(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<BookWithReviews>, Failure> {
    let store = db.read().await;
    let book = store.books.get(&id).cloned().ok_or(BOOK_NOT_FOUND)?;
    let reviews = store
        .reviews
        .values()
        .filter(|review| review.book_id == id)
        .cloned()
        .collect();
    Ok(Json(BookWithReviews { book, reviews }))
}

async fn create_review(
    State(db): State<Db>,
    Path(book_id): Path<i64>,
    Json(input): Json<CreateReview>,
) -> Result<(StatusCode, Json<Review>), Failure> {
    let mut store = db.write().await;
    if !store.books.contains_key(&book_id) {
        return Err(BOOK_NOT_FOUND);
    }
    require_text(&input.reviewer_name)?;
    validate_rating(input.rating)?;

    store.last_review_id += 1;
    let review = Review {
        id: store.last_review_id,
        book_id,
        reviewer_name: input.reviewer_name,
        rating: input.rating,
        comment: input.comment,
        created_at: Utc::now(),
        updated_at: None,
    };
    store.reviews.insert(review.id, review.clone());
    Ok((StatusCode::CREATED, Json(review)))
}

async fn get_review(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Review>, Failure> {
    let store = db.read().await;
    store.reviews.get(&id).cloned().map(Json).ok_or(REVIEW_NOT_FOUND)
}

async fn update_review(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateReview>,
) -> Result<Json<Review>, Failure> {
    let mut store = db.write().await;
    let review = store.reviews.get_mut(&id).ok_or(REVIEW_NOT_FOUND)?;
    if let Some(name) = &input.reviewer_name {
        require_text(name)?;
    }
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }
    if let Some(name) = input.reviewer_name {
        review.reviewer_name = name;
    }
    if let Some(rating) = input.rating {
        review.rating = rating;
    }
    if let Some(comment) = input.comment {
        review.comment = Some(comment);
    }
    review.updated_at = Some(Utc::now());
    Ok(Json(review.clone()))
}

async fn delete_review(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Failure> {
    let mut store = db.write().await;
    store
        .reviews
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(REVIEW_NOT_FOUND)
}

impl Store {
    fn ensure_isbn_free(&self, isbn: Option<&str>, except: Option<i64>) -> Result<(), Failure> {
        let Some(isbn) = isbn else {
            return Ok(());
        };
        let taken = self
            .books
            .values()
            .any(|book| book.isbn.as_deref() == Some(isbn) && Some(book.id) != except);
        if taken {
            return Err(Failure(StatusCode::BAD_REQUEST, "Book with this ISBN already exists"));
        }
        Ok(())
    }
}

fn require_text(value: &str) -> Result<(), Failure> {
    if value.is_empty() {
        return Err(Failure(StatusCode::UNPROCESSABLE_ENTITY, "field must not be empty"));
    }
    Ok(())
}

fn validate_isbn(isbn: Option<&str>) -> Result<(), Failure> {
    let Some(isbn) = isbn else {
        return Ok(());
    };
    let compact: Vec<char> = isbn.chars().filter(|c| *c != '-' && *c != ' ').collect();
    let valid = match compact.len() {
        10 => {
            let (body, check) = compact.split_at(9);
            body.iter().all(char::is_ascii_digit)
                && (check[0].is_ascii_digit() || check[0].eq_ignore_ascii_case(&'x'))
        }
        13 => compact.iter().all(char::is_ascii_digit),
        _ => false,
    };
    if !valid {
        return Err(Failure(StatusCode::BAD_REQUEST, "Invalid ISBN format"));
    }
    Ok(())
}

fn validate_year(year: Option<i32>) -> Result<(), Failure> {
    match year {
        Some(year) if year < 1 => Err(Failure(StatusCode::BAD_REQUEST, "Invalid publication year")),
        _ => Ok(()),
    }
}

fn validate_rating(rating: i64) -> Result<(), Failure> {
    if !(1..=5).contains(&rating) {
        return Err(Failure(StatusCode::BAD_REQUEST, "Rating must be between 1 and 5"));
    }
    Ok(())
}
