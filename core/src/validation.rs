//! Client-side checks applied to form data before any request is sent.

use thiserror::Error;

use crate::types::{BookFormData, ReviewFormData};

/// Why a form was rejected before reaching the network.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("ISBN must be 10 or 13 digits (ISBN-10 may end in X), got {0:?}")]
    InvalidIsbn(String),

    #[error("publication year must be positive, got {0}")]
    InvalidYear(i32),
}

impl BookFormData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("title"));
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::Required("author"));
        }
        if let Some(isbn) = self.isbn.as_deref() {
            if !is_valid_isbn(isbn) {
                return Err(ValidationError::InvalidIsbn(isbn.to_string()));
            }
        }
        match self.publication_year {
            Some(year) if year < 1 => Err(ValidationError::InvalidYear(year)),
            _ => Ok(()),
        }
    }
}

impl ReviewFormData {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reviewer_name.trim().is_empty() {
            return Err(ValidationError::Required("reviewer name"));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }
}

/// Shape check for ISBN-10 / ISBN-13. Hyphens and spaces are ignored;
/// checksums are not verified.
pub fn is_valid_isbn(isbn: &str) -> bool {
    let compact: Vec<char> = isbn.chars().filter(|c| *c != '-' && !c.is_whitespace()).collect();
    match compact.len() {
        10 => {
            let (body, check) = compact.split_at(9);
            body.iter().all(char::is_ascii_digit) && (check[0].is_ascii_digit() || check[0].eq_ignore_ascii_case(&'x'))
        }
        13 => compact.iter().all(char::is_ascii_digit),
        _ => false,
    }
}
