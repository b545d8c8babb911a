//! Basic example demonstrating the cdnjs API client.
//!
//! Run with:
//! ```
//! cargo run --example basic
//! ```

use cdnjs::{CdnJsClient, RequestOptions, SearchRequestOptions};

#[tokio::main]
async fn main() -> cdnjs::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let client = CdnJsClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Search the catalog
    println!("\n--- Searching for 'date picker' ---");
    let hits = client
        .search_libraries(&SearchRequestOptions::new("date picker"), None)
        .await?;
    println!("Found {} libraries", hits.len());

    for library in hits.iter().take(5) {
        println!(
            "  - {} ({})",
            library.name().unwrap_or("?"),
            library.latest_main_file_url.as_deref().unwrap_or("-")
        );
    }

    // Get one library with its description and homepage
    println!("\n--- Getting Library Details ---");
    let options = RequestOptions::minimal()
        .to_mutable()
        .with_field("description")?
        .with_field("homepage_url")?;
    let jquery = client.get_library("jquery", Some(&options), None).await?;
    println!("Library: {}", jquery.name().unwrap_or("?"));
    println!("  Latest: {}", jquery.version().unwrap_or("?"));
    if let Some(homepage) = jquery.homepage_uri()? {
        println!("  Homepage host: {}", homepage.host_str().unwrap_or("?"));
    }

    // List the files of the latest version
    if let Some(version) = jquery.version() {
        println!("\n--- Assets for jquery@{version} ---");
        let assets = client.get_library_assets("jquery", version, None, None).await?;
        for file in assets.files() {
            println!("  {file}  {}", assets.sri_for(file).unwrap_or("-"));
        }
    }

    client.close().await;
    Ok(())
}
