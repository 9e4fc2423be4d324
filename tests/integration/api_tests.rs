//! API integration tests
//!
//! These run against a live server started with `RUN_MODE=test`, which points
//! it at the `books-test` database. Each test seeds its own fixture book and
//! removes it afterwards.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000";

fn fixture(isbn: &str) -> Value {
    json!({
        "isbn": isbn,
        "amazon_url": "https://amazon.com/series-a-books",
        "author": "John",
        "language": "English",
        "pages": 413,
        "publisher": "Publishers Imaginary",
        "title": "The New Book!",
        "year": 2019
    })
}

fn update_payload() -> Value {
    json!({
        "amazon_url": "https://classicbooks.com",
        "author": "Edward",
        "language": "english",
        "pages": 207,
        "publisher": "Publishers Ye Olde Classics",
        "title": "A New Classic!",
        "year": 2000
    })
}

/// Create the fixture book, returning its ISBN
async fn seed(client: &Client, isbn: &str) -> String {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&fixture(isbn))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    isbn.to_string()
}

async fn cleanup(client: &Client, isbn: &str) {
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, isbn))
        .send()
        .await;
}

async fn get_book(client: &Client, isbn: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, isbn))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body: Value = response.json().await.expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_create_book() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "isbn": "1456317858",
            "amazon_url": "https://amazon.com/classic-books",
            "author": "Edward",
            "language": "English",
            "pages": 207,
            "publisher": "Publishers Olde",
            "title": "The Old Classic!",
            "year": 2005
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["isbn"], "1456317858");

    cleanup(&client, "1456317858").await;
}

#[tokio::test]
#[ignore]
async fn test_create_book_missing_data() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "year": 2005 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"]["status"], 400);
    assert!(body["error"]["message"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();
    let isbn = seed(&client, "1000000000001").await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().expect("No books array");
    let book = books
        .iter()
        .find(|book| book["isbn"] == isbn.as_str())
        .expect("Seeded book not listed");
    for property in [
        "isbn",
        "amazon_url",
        "author",
        "language",
        "pages",
        "publisher",
        "title",
        "year",
    ] {
        assert!(book.get(property).is_some(), "missing {}", property);
    }

    cleanup(&client, &isbn).await;
}

#[tokio::test]
#[ignore]
async fn test_get_book() {
    let client = Client::new();
    let isbn = seed(&client, "1000000000002").await;

    let (status, first) = get_book(&client, &isbn).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["book"]["isbn"], isbn.as_str());

    let (_, second) = get_book(&client, &isbn).await;
    assert_eq!(first, second);

    cleanup(&client, &isbn).await;
}

#[tokio::test]
#[ignore]
async fn test_get_book_not_found() {
    let client = Client::new();

    let (status, body) = get_book(&client, "0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "There is no book with an isbn '0");
}

#[tokio::test]
#[ignore]
async fn test_update_book() {
    let client = Client::new();
    let isbn = seed(&client, "1000000000003").await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, isbn))
        .json(&update_payload())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["isbn"], isbn.as_str());
    assert_eq!(body["book"]["title"], "A New Classic!");

    cleanup(&client, &isbn).await;
}

#[tokio::test]
#[ignore]
async fn test_update_book_bad_field() {
    let client = Client::new();
    let isbn = seed(&client, "1000000000004").await;
    let (_, before) = get_book(&client, &isbn).await;

    let mut payload = update_payload();
    payload["isbn"] = json!("999999999");
    payload["badField"] = json!("NEVER ADD ME!!!");

    let response = client
        .put(format!("{}/books/{}", BASE_URL, isbn))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, after) = get_book(&client, &isbn).await;
    assert_eq!(before, after);

    cleanup(&client, &isbn).await;
}

#[tokio::test]
#[ignore]
async fn test_update_deleted_book() {
    let client = Client::new();
    let isbn = seed(&client, "1000000000005").await;
    cleanup(&client, &isbn).await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, isbn))
        .json(&update_payload())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_delete_book() {
    let client = Client::new();
    let isbn = seed(&client, "1000000000006").await;

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, isbn))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "message": "Book deleted" }));

    let (status, _) = get_book(&client, &isbn).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
