//! Book catalog service

use std::sync::Arc;

use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, UpdateBook, BOOK_SCHEMA, BOOK_UPDATE_SCHEMA},
    repository::BookStore,
    validation,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list().await
    }

    pub async fn get(&self, isbn: &str) -> AppResult<Book> {
        self.store.get(isbn).await
    }

    /// Validate a create payload and insert it
    pub async fn create(&self, payload: Value) -> AppResult<Book> {
        let book: Book = validation::parse(&BOOK_SCHEMA, payload).map_err(rejected)?;
        let created = self.store.create(&book).await?;
        tracing::info!("Book created: isbn={}", created.isbn);
        Ok(created)
    }

    /// Validate an update payload and overwrite the mutable fields of `isbn`
    pub async fn update(&self, isbn: &str, payload: Value) -> AppResult<Book> {
        let data: UpdateBook = validation::parse(&BOOK_UPDATE_SCHEMA, payload).map_err(rejected)?;
        let updated = self.store.update(isbn, &data).await?;
        tracing::info!("Book updated: isbn={}", isbn);
        Ok(updated)
    }

    pub async fn delete(&self, isbn: &str) -> AppResult<()> {
        self.store.delete(isbn).await?;
        tracing::info!("Book deleted: isbn={}", isbn);
        Ok(())
    }
}

fn rejected(error: AppError) -> AppError {
    tracing::warn!("Rejected book payload: {}", error);
    error
}
