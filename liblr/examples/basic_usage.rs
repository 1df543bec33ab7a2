//! Basic usage example for the liblr library.
//!
//! Resolves the connection the same way the `lr` binary does
//! (`~/.lr.json`, then `REGISTRY_ADDRESS` / `REGISTRY_USER` / `REGISTRY_PASSWORD`)
//! and prints the registry catalog with the tags of each image.
//!
//! Run with: cargo run --example basic_usage

use liblr::connection::default_config_path;
use liblr::{Client, Connection, Registry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (conn, source) = Connection::resolve(&default_config_path())?;
    println!("Connecting to {} (credentials from {})\n", conn.address(), source);

    let registry = Registry::new(Client::new(conn)?);

    let repos = registry.list_repositories()?;
    println!("Found {} repositories:", repos.len());
    for repo in repos.iter().take(10) {
        match registry.list_tags(repo) {
            Ok(tags) => println!("  - {} [{}]", repo, tags.join(", ")),
            Err(e) => println!("  - {} (tags unavailable: {})", repo, e),
        }
    }
    if repos.len() > 10 {
        println!("  ... and {} more", repos.len() - 10);
    }

    Ok(())
}
