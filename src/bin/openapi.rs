//! Print the OpenAPI document for the bookstore API to stdout

fn main() -> anyhow::Result<()> {
    println!("{}", bookstore_server::api::openapi::document()?);
    Ok(())
}
