//! Application context that holds resolved configuration
//!
//! The context is built once in `main` from CLI flags (which clap already
//! merges with their `LR_*` environment variables) and passed read-only to
//! every handler. Registry credentials are resolved lazily by
//! [`AppContext::connect`], so `help`, `version` and `completion` work
//! without any registry configured.

use crate::format::{self, ColorChoice, OutputFormat};
use liblr::client::{Client, ClientConfig};
use liblr::connection::{self, Connection};
use liblr::registry::Registry;
use std::path::PathBuf;

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Remediation shown when no complete set of credentials could be resolved.
pub const CREDENTIALS_HELP: &str = concat!(
    "Set registry connection information inside config file ~/.lr.json:\n",
    r#"  {"addr":"https://registry.example.com","user":"myuser","password":"mypassword"}"#,
    "\nor with env variables:\n",
    "  export REGISTRY_ADDRESS=https://registry.example.com\n",
    "  export REGISTRY_USER=myuser\n",
    "  export REGISTRY_PASSWORD=mypassword\n",
    "note that config file takes precedence over env vars",
);

/// How much diagnostic output to write to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Errors and warnings only
    Normal,
    /// Workflow steps (-v)
    Verbose,
    /// Every registry request (-vv and above)
    VeryVerbose,
}

impl VerbosityLevel {
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::VeryVerbose,
        }
    }
}

/// Application context with resolved configuration
#[derive(Debug, Clone)]
pub struct AppContext {
    pub color: ColorChoice,
    pub verbosity: VerbosityLevel,
    pub format: OutputFormat,
    /// Credentials file consulted before the environment
    pub config_path: PathBuf,
    /// Request timeouts
    pub client_config: ClientConfig,
}

impl AppContext {
    /// Build the context; a missing `config_path` means `~/.lr.json`.
    pub fn build(
        color: ColorChoice,
        verbosity: VerbosityLevel,
        format: OutputFormat,
        config_path: Option<PathBuf>,
        client_config: ClientConfig,
    ) -> Self {
        Self {
            color,
            verbosity,
            format,
            config_path: config_path.unwrap_or_else(connection::default_config_path),
            client_config,
        }
    }

    /// Resolves the registry connection and returns a ready registry handle.
    pub fn connect(&self) -> liblr::Result<Registry> {
        let (connection, source) = Connection::resolve(&self.config_path)?;

        format::print(
            self,
            VerbosityLevel::Verbose,
            &format!("Using registry {} (from {})", connection.address(), source),
        );

        let client = Client::with_config(connection, self.client_config.clone())?;
        Ok(Registry::new(client))
    }

    /// Like [`AppContext::connect`], with the error rendered for the user.
    ///
    /// Configuration errors carry the credentials remediation text.
    pub fn connect_or_explain(&self) -> Result<Registry, String> {
        self.connect().map_err(|e| {
            if e.is_config() {
                format!("{}\n{}", e, CREDENTIALS_HELP)
            } else {
                e.to_string()
            }
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::build(
            ColorChoice::Never,
            VerbosityLevel::Normal,
            OutputFormat::Pretty,
            Some(PathBuf::from("/nonexistent/lr-test.json")),
            ClientConfig::default(),
        )
    }
}
