//! Book storage

use async_trait::async_trait;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, UpdateBook},
};

/// Storage collaborator for book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, in storage order
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get(&self, isbn: &str) -> AppResult<Book>;

    /// Insert a new row; a duplicate ISBN surfaces as a database error
    async fn create(&self, book: &Book) -> AppResult<Book>;

    /// Overwrite every mutable column of an existing row
    async fn update(&self, isbn: &str, data: &UpdateBook) -> AppResult<Book>;

    async fn delete(&self, isbn: &str) -> AppResult<()>;
}

pub fn not_found(isbn: &str) -> AppError {
    AppError::NotFound(format!("There is no book with an isbn '{}", isbn))
}

#[async_trait]
impl BookStore for Repository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT isbn, amazon_url, author, language, pages, publisher, title, year FROM books",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, isbn: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT isbn, amazon_url, author, language, pages, publisher, title, year
            FROM books
            WHERE isbn = $1
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(isbn))
    }

    async fn create(&self, book: &Book) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, amazon_url, author, language, pages, publisher, title, year)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING isbn, amazon_url, author, language, pages, publisher, title, year
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, isbn: &str, data: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET amazon_url = $1, author = $2, language = $3, pages = $4,
                publisher = $5, title = $6, year = $7
            WHERE isbn = $8
            RETURNING isbn, amazon_url, author, language, pages, publisher, title, year
            "#,
        )
        .bind(&data.amazon_url)
        .bind(&data.author)
        .bind(&data.language)
        .bind(data.pages)
        .bind(&data.publisher)
        .bind(&data.title)
        .bind(data.year)
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(isbn))
    }

    async fn delete(&self, isbn: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(isbn));
        }
        Ok(())
    }
}
