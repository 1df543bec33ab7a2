//! Registry connection settings.
//!
//! A [`Connection`] is resolved once per run from one of two sources, in
//! order:
//!
//! 1. The JSON credentials file (`~/.lr.json` by default):
//!    `{"addr":"https://registry.example.com","user":"myuser","password":"mypassword"}`
//! 2. The `REGISTRY_ADDRESS`, `REGISTRY_USER` and `REGISTRY_PASSWORD`
//!    environment variables, consulted only when the file is missing or
//!    cannot be parsed.
//!
//! Sources are not merged field by field: a file that parses wins outright,
//! even when it leaves a field empty.

use crate::auth::Credentials;
use crate::error::{LrError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;


/// Name of the credentials file inside the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".lr.json";

/// Environment variable holding the registry address.
pub const ENV_ADDRESS: &str = "REGISTRY_ADDRESS";
/// Environment variable holding the registry username.
pub const ENV_USER: &str = "REGISTRY_USER";
/// Environment variable holding the registry password.
pub const ENV_PASSWORD: &str = "REGISTRY_PASSWORD";

/// Where a resolved connection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSource {
    /// The JSON credentials file at the given path
    File(PathBuf),
    /// The `REGISTRY_*` environment variables
    Environment,
}

impl fmt::Display for ConnectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Environment => f.write_str("environment"),
        }
    }
}

/// Raw settings as they appear in the credentials file.
#[derive(Debug, Default, Deserialize)]
struct ConnectionFile {
    #[serde(default, alias = "Addr")]
    addr: String,
    #[serde(default, alias = "User")]
    user: String,
    #[serde(default, alias = "Password")]
    password: String,
}

/// Validated registry address and credentials for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Normalized base URL without a trailing slash
    address: String,
    /// Basic authentication credentials
    credentials: Credentials,
}

impl Connection {
    /// Creates a connection, rejecting empty fields and normalizing the address.
    ///
    /// # Examples
    ///
    /// ```
    /// use liblr::connection::Connection;
    ///
    /// let conn = Connection::new("registry.example.com/", "u", "p").unwrap();
    /// assert_eq!(conn.address(), "http://registry.example.com");
    ///
    /// assert!(Connection::new("https://r.example", "", "p").is_err());
    /// ```
    pub fn new(address: &str, user: &str, password: &str) -> Result<Self> {
        let missing = missing_fields(address, user, password);
        if !missing.is_empty() {
            return Err(LrError::config(
                format!("missing registry {}", missing.join(", ")),
                None,
            ));
        }

        Ok(Self {
            address: normalize_address(address)?,
            credentials: Credentials::basic(user, password),
        })
    }

    /// Returns the base registry URL.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolves the connection from the credentials file at `path`, falling
    /// back to the process environment.
    pub fn resolve(path: &Path) -> Result<(Self, ConnectionSource)> {
        Self::resolve_with(path, |key| std::env::var(key).ok())
    }

    /// Resolves the connection using `env` to look up environment variables.
    ///
    /// The file is used when it exists and parses as JSON; otherwise the
    /// three `REGISTRY_*` variables are read through `env`. Whichever source
    /// is chosen must provide all three values.
    pub fn resolve_with<F>(path: &Path, env: F) -> Result<(Self, ConnectionSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (raw, source) = match read_connection_file(path) {
            Some(file) => (file, ConnectionSource::File(path.to_path_buf())),
            None => {
                let lookup = |key: &str| env(key).unwrap_or_default();
                let raw = ConnectionFile {
                    addr: lookup(ENV_ADDRESS),
                    user: lookup(ENV_USER),
                    password: lookup(ENV_PASSWORD),
                };
                (raw, ConnectionSource::Environment)
            }
        };

        let missing = missing_fields(&raw.addr, &raw.user, &raw.password);
        if !missing.is_empty() {
            let path_str = path.display().to_string();
            return Err(LrError::config(
                format!(
                    "missing registry {} (read from {})",
                    missing.join(", "),
                    source
                ),
                Some(path_str),
            ));
        }

        let connection = Self::new(&raw.addr, &raw.user, &raw.password)?;
        Ok((connection, source))
    }
}

/// Returns the default credentials file path, `~/.lr.json`.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_config_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/// Reads and parses the credentials file; `None` when absent or unparsable.
fn read_connection_file(path: &Path) -> Option<ConnectionFile> {
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

fn missing_fields(address: &str, user: &str, password: &str) -> Vec<&'static str> {
    [("address", address), ("user", user), ("password", password)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

/// Normalizes a registry address by ensuring it has a scheme and removing
/// trailing slashes.
pub fn normalize_address(address: &str) -> Result<String> {
    let address = address.trim();

    if address.is_empty() {
        return Err(LrError::validation("Registry address cannot be empty"));
    }

    let address = if !address.starts_with("http://") && !address.starts_with("https://") {
        format!("http://{}", address)
    } else {
        address.to_string()
    };

    let address = address.trim_end_matches('/').to_string();

    Url::parse(&address).map_err(|e| {
        LrError::validation_with_source(format!("Invalid registry address '{}'", address), e)
    })?;

    Ok(address)
}
