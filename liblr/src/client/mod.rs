//! HTTP client for registry communication.
//!
//! This module is a thin, blocking wrapper around reqwest. Every method
//! performs exactly one authenticated request against the registry:
//!
//! - [`Client::get_body`] for listing reads (catalog, tag lists)
//! - [`Client::get_header`] for digest lookups
//! - [`Client::delete`] for manifest deletion
//!
//! Transport failures are returned as [`LrError::Network`]; callers are
//! expected to abort on them.

use crate::connection::Connection;
use crate::error::{LrError, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client as ReqwestClient, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;

#[cfg(test)]
mod tests;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = "registry-client";

/// Media type requested when resolving a tag to its manifest digest.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// Response header carrying the manifest digest.
pub const DIGEST_HEADER: &str = "Docker-Content-Digest";

/// HTTP method of a registry request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Delete => "DELETE",
        }
    }
}

/// Configuration for the HTTP client.
///
/// Listing reads and modifying calls (digest lookup, delete) have separate
/// timeouts:
///
/// ```
/// use liblr::client::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_list_timeout(30)
///     .with_modify_timeout(10);
/// assert_eq!(config.list_timeout_seconds, 30);
/// assert_eq!(config.modify_timeout_seconds, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Timeout for catalog and tag list reads in seconds (default: 15)
    pub list_timeout_seconds: u64,
    /// Timeout for digest lookups and deletes in seconds (default: 5)
    pub modify_timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            list_timeout_seconds: 15,
            modify_timeout_seconds: 5,
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listing timeout in seconds.
    pub fn with_list_timeout(mut self, seconds: u64) -> Self {
        self.list_timeout_seconds = seconds;
        self
    }

    /// Sets the digest lookup and delete timeout in seconds.
    pub fn with_modify_timeout(mut self, seconds: u64) -> Self {
        self.modify_timeout_seconds = seconds;
        self
    }
}

/// Result of a digest lookup: the response status plus the requested header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLookup {
    /// Status line of the lookup response, e.g. `200 OK`
    pub status: String,
    /// Header value, `None` when the registry did not send it
    pub value: Option<String>,
}

/// HTTP client for registry operations.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    /// Base registry URL and credentials
    connection: Connection,
    /// Per-request timeouts
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with default timeouts.
    ///
    /// # Examples
    ///
    /// ```
    /// use liblr::client::Client;
    /// use liblr::connection::Connection;
    ///
    /// let conn = Connection::new("http://localhost:5000", "user", "pass").unwrap();
    /// let client = Client::new(conn).unwrap();
    /// assert_eq!(client.registry_url(), "http://localhost:5000");
    /// ```
    pub fn new(connection: Connection) -> Result<Self> {
        Self::with_config(connection, ClientConfig::default())
    }

    /// Creates a new client with custom timeouts.
    pub fn with_config(connection: Connection, config: ClientConfig) -> Result<Self> {
        let http_client = ReqwestClient::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LrError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            connection,
            config,
        })
    }

    /// Returns the base registry URL.
    pub fn registry_url(&self) -> &str {
        self.connection.address()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the full URL for a path such as `/v2/_catalog`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.connection.address(), path)
    }

    /// Performs a GET with the listing timeout and returns the response body.
    ///
    /// Non-success statuses are translated into errors, since the body of an
    /// error response is never the document the caller wants to decode.
    pub fn get_body(&self, path: &str) -> Result<Vec<u8>> {
        let timeout = Duration::from_secs(self.config.list_timeout_seconds);
        let response = self.send(Method::Get, path, None, timeout)?;
        let response = Self::check_response_status(response)?;

        let url = self.url_for(path);
        let body = response.bytes().map_err(|e| {
            LrError::network_with_source(format!("Failed to read response from {}", url), e)
        })?;

        Ok(body.to_vec())
    }

    /// Performs a GET with the modify timeout and returns one response header.
    ///
    /// The status is reported rather than checked: a missing tag shows up as
    /// a `404 Not Found` status with no header value.
    pub fn get_header(
        &self,
        path: &str,
        accept: Option<&str>,
        header: &str,
    ) -> Result<HeaderLookup> {
        let timeout = Duration::from_secs(self.config.modify_timeout_seconds);
        let response = self.send(Method::Get, path, accept, timeout)?;

        let value = response
            .headers()
            .get(header)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(HeaderLookup {
            status: status_line(response.status()),
            value,
        })
    }

    /// Performs a DELETE with the modify timeout and returns the status line.
    pub fn delete(&self, path: &str) -> Result<String> {
        let timeout = Duration::from_secs(self.config.modify_timeout_seconds);
        let response = self.send(Method::Delete, path, None, timeout)?;
        Ok(status_line(response.status()))
    }

    /// Issues a single authenticated request.
    fn send(
        &self,
        method: Method,
        path: &str,
        accept: Option<&str>,
        timeout: Duration,
    ) -> Result<Response> {
        let url = self.url_for(path);

        let mut request = match method {
            Method::Get => self.http_client.get(&url),
            Method::Delete => self.http_client.delete(&url),
        };

        request = request
            .timeout(timeout)
            .header(AUTHORIZATION, self.connection.credentials().to_header_value());

        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        request
            .send()
            .map_err(|e| Self::translate_reqwest_error(e, method, &url, timeout))
    }

    /// Translates a reqwest error into an LrError.
    fn translate_reqwest_error(
        error: reqwest::Error,
        method: Method,
        url: &str,
        timeout: Duration,
    ) -> LrError {
        if error.is_timeout() {
            LrError::network(format!(
                "{} {} timed out after {} seconds",
                method.as_str(),
                url,
                timeout.as_secs()
            ))
        } else if error.is_connect() {
            LrError::network_with_source(format!("Failed to connect to {}", url), error)
        } else if error.is_request() || error.is_builder() {
            LrError::network_with_source(
                format!("Failed to send {} request to {}", method.as_str(), url),
                error,
            )
        } else {
            LrError::network_with_source(format!("Network error communicating with {}", url), error)
        }
    }

    /// Checks the HTTP response status and translates errors to LrError.
    fn check_response_status(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_body = response
            .text()
            .unwrap_or_else(|_| String::from("(unable to read response body)"));

        match status {
            StatusCode::UNAUTHORIZED => Err(LrError::authentication(
                format!("Authentication required for {}: {}", url, error_body),
                Some(401),
            )),
            StatusCode::FORBIDDEN => Err(LrError::authentication(
                format!("Access forbidden for {}: {}", url, error_body),
                Some(403),
            )),
            StatusCode::NOT_FOUND => Err(LrError::not_found("endpoint", url.as_str())),
            StatusCode::TOO_MANY_REQUESTS => Err(LrError::rate_limit(format!(
                "Rate limit exceeded for {}",
                url
            ))),
            s if s.is_server_error() => Err(LrError::server(
                format!("Server error from {}: {}", url, error_body),
                s.as_u16(),
            )),
            _ => Err(LrError::network(format!(
                "HTTP {} from {}: {}",
                status.as_u16(),
                url,
                error_body
            ))),
        }
    }
}

/// Renders a status the way it appears on the response line, e.g. `202 Accepted`.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
