//! Basic example demonstrating the Tenable.sc API client.
//!
//! Run with:
//! ```
//! SC05_URL=https://sc.example.com SC05_ACCESS_KEY=... SC05_SECRET_KEY=... \
//!     cargo run --example basic
//! ```

use tenable::{AnalysisFilter, AnalysisRequest, RepositoryQuery, TenableClient};

#[tokio::main]
async fn main() -> tenable::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Tenable.sc client...");
    let client = TenableClient::from_env()?;
    println!("Connected to: {}", client.base_url());
    println!("Authenticated: {}", client.authentication().is_authenticated());

    // Who are we?
    println!("\n--- Current User ---");
    let user = client.current_user().get().await?;
    println!(
        "User: {} ({})",
        user.display_name().unwrap_or_default(),
        user.username.as_deref().unwrap_or("unknown")
    );
    if let Some(last_login) = user.last_login_at() {
        println!("  Last login: {}", last_login);
    }

    // List repositories
    println!("\n--- Repositories ---");
    let query = RepositoryQuery::default().with_fields(["id", "name", "type"]);
    let repositories = client.repositories().list(&query).await?;
    println!("Found {} repositories", repositories.len());

    for repo in &repositories {
        println!(
            "  - {} ({})",
            repo.name.as_deref().unwrap_or("unnamed"),
            repo.repository_type.as_deref().unwrap_or("unknown")
        );
    }

    // Walk the hosts reporting the "Nessus Scan Information" plugin
    println!("\n--- Hosts Scanned ---");
    let mut request = AnalysisRequest::vulnerabilities("listvuln")
        .with_filter(AnalysisFilter::plugin_ids(["19506"]));
    let mut seen = 0;

    loop {
        let page = client.analysis().query(&request).await?;
        for row in &page {
            seen += 1;
            println!(
                "  {}. {} {}",
                seen,
                row.ip.as_deref().unwrap_or("?"),
                row.dns_name.as_deref().unwrap_or("")
            );
        }

        match page.next_window() {
            Some(window) if seen < 200 => request = request.with_window(window),
            _ => break,
        }
    }

    println!("\nDone!");
    Ok(())
}
