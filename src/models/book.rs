//! Book model and request/response bodies

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::validation::{Field, FieldType, Schema};

/// Book record, keyed by ISBN
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Primary key, never changed once created
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

/// Update book request: every field except the ISBN
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    pub year: i32,
}

impl UpdateBook {
    /// The book as stored after applying this update to `isbn`
    pub fn into_book(self, isbn: impl Into<String>) -> Book {
        Book {
            isbn: isbn.into(),
            amazon_url: self.amazon_url,
            author: self.author,
            language: self.language,
            pages: self.pages,
            publisher: self.publisher,
            title: self.title,
            year: self.year,
        }
    }
}

/// Create payload: all fields required, unknown fields ignored
pub const BOOK_SCHEMA: Schema = Schema {
    fields: &[
        Field::required("isbn", FieldType::String),
        Field::required("amazon_url", FieldType::String),
        Field::required("author", FieldType::String),
        Field::required("language", FieldType::String),
        Field::required("pages", FieldType::Integer),
        Field::required("publisher", FieldType::String),
        Field::required("title", FieldType::String),
        Field::required("year", FieldType::Integer),
    ],
    additional_properties: true,
};

/// Update payload: mutable fields only, anything else (including `isbn`) rejected
pub const BOOK_UPDATE_SCHEMA: Schema = Schema {
    fields: &[
        Field::required("amazon_url", FieldType::String),
        Field::required("author", FieldType::String),
        Field::required("language", FieldType::String),
        Field::required("pages", FieldType::Integer),
        Field::required("publisher", FieldType::String),
        Field::required("title", FieldType::String),
        Field::required("year", FieldType::Integer),
    ],
    additional_properties: false,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub book: Book,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
