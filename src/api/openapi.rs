//! OpenAPI documentation

use utoipa::OpenApi;

use crate::api::books;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore API",
        version = "0.1.0",
        description = "REST API for managing book records"
    ),
    paths(
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::UpdateBook,
            crate::models::book::BookResponse,
            crate::models::book::BooksResponse,
            crate::models::book::MessageResponse,
            crate::error::ErrorBody,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "books", description = "Book management")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document as pretty-printed JSON
pub fn document() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
