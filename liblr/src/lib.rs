//! liblr - Container Registry Client Library
//!
//! liblr talks to a container registry's HTTP API to list repositories,
//! list tags, and delete tags by digest.
//!
//! # Quick Start
//!
//! ```no_run
//! use liblr::{Client, Connection, Registry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let conn = Connection::new("https://registry.example.com", "myuser", "mypassword")?;
//!     let registry = Registry::new(Client::new(conn)?);
//!
//!     for repo in registry.list_repositories()? {
//!         println!("{}", repo);
//!     }
//!
//!     let record = registry.delete_tag("myimage", "old")?;
//!     println!("{}", record);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`connection`] - resolving the registry address and credentials
//! - [`client`] - single authenticated HTTP requests
//! - [`registry`] - catalog, tag listing and tag deletion workflows
//! - [`action`] - command verbs and the `image:tag1,tag2` argument
//! - [`error`] - error type shared by all of the above

#![warn(clippy::all)]

/// Returns the liblr crate version.
///
/// # Examples
///
/// ```
/// let version = liblr::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod action;
pub mod auth;
pub mod client;
pub mod connection;
pub mod error;
pub mod registry;

pub use action::{Action, TagSelection};
pub use auth::Credentials;
pub use client::{Client, ClientConfig};
pub use connection::{Connection, ConnectionSource};
pub use error::{LrError, Result};
pub use registry::{Registry, TagDeletion};
