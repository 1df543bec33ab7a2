//! Registry operations module.
//!
//! This module maps the registry workflows onto [`Client`] calls: listing
//! the catalog, listing tags, and the two-phase tag deletion (resolve the
//! tag to its manifest digest, then delete the manifest by digest).

use crate::action::TagSelection;
use crate::client::{Client, DIGEST_HEADER, HeaderLookup, MANIFEST_V2_MEDIA_TYPE};
use crate::error::{LrError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;


/// Response from the catalog endpoint listing repositories.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CatalogResponse {
    /// List of repository names.
    pub repositories: Vec<String>,
}

/// Response from the tags endpoint listing tags for a repository.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TagsResponse {
    /// List of tags. Some registries send `null` for a repository whose
    /// tags were all deleted.
    #[serde(deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Outcome of deleting one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagDeletion {
    /// Repository name
    pub image: String,
    /// Tag that was resolved
    pub tag: String,
    /// Manifest digest, empty when the registry did not report one
    pub digest: String,
    /// Status line of the delete response, or `skipped (lookup ...)` when
    /// no digest was found and no delete was issued
    pub status: String,
}

impl TagDeletion {
    /// Returns true when a digest was found and a delete was issued.
    pub fn has_digest(&self) -> bool {
        !self.digest.is_empty()
    }
}

impl fmt::Display for TagDeletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}:{}\t(digest: {})",
            self.status, self.image, self.tag, self.digest
        )
    }
}

/// Registry operations over a single client.
#[derive(Debug, Clone)]
pub struct Registry {
    /// HTTP client for registry communication.
    client: Client,
}

impl Registry {
    /// Creates a new `Registry` instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use liblr::client::Client;
    /// use liblr::connection::Connection;
    /// use liblr::registry::Registry;
    ///
    /// let conn = Connection::new("http://localhost:5000", "user", "pass").unwrap();
    /// let registry = Registry::new(Client::new(conn).unwrap());
    /// ```
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Lists all repositories in the registry, in catalog order.
    pub fn list_repositories(&self) -> Result<Vec<String>> {
        let body = self.client.get_body("/v2/_catalog")?;
        let catalog: CatalogResponse = serde_json::from_slice(&body).map_err(|e| {
            LrError::validation_with_source("Failed to parse catalog response", e)
        })?;
        Ok(catalog.repositories)
    }

    /// Lists the tags of `image`, in the order the registry returns them.
    pub fn list_tags(&self, image: &str) -> Result<Vec<String>> {
        let image = require_image(image)?;
        let body = self.client.get_body(&tags_path(image))?;
        let tags: TagsResponse = serde_json::from_slice(&body).map_err(|e| {
            LrError::validation_with_source(
                format!("Failed to parse tags response for '{}'", image),
                e,
            )
        })?;
        Ok(tags.tags)
    }

    /// Selects every tag of `image` for deletion.
    pub fn select_all_tags(&self, image: &str) -> Result<TagSelection> {
        let tags = self.list_tags(image)?;
        Ok(TagSelection::new(image, tags))
    }

    /// Looks up the manifest digest that `tag` currently points at.
    pub fn resolve_digest(&self, image: &str, tag: &str) -> Result<HeaderLookup> {
        self.client.get_header(
            &manifest_path(image, tag),
            Some(MANIFEST_V2_MEDIA_TYPE),
            DIGEST_HEADER,
        )
    }

    /// Deletes one tag by resolving its digest and deleting that manifest.
    ///
    /// When the lookup returns no digest the delete is skipped and the
    /// status reads `skipped (lookup 404 Not Found)`, carrying the lookup's
    /// status line so it is never mistaken for a delete outcome.
    pub fn delete_tag(&self, image: &str, tag: &str) -> Result<TagDeletion> {
        let image = require_image(image)?;
        let lookup = self.resolve_digest(image, tag)?;

        let (digest, status) = match lookup.value {
            Some(digest) => {
                let status = self.client.delete(&manifest_path(image, &digest))?;
                (digest, status)
            }
            None => (String::new(), format!("skipped (lookup {})", lookup.status)),
        };

        Ok(TagDeletion {
            image: image.to_string(),
            tag: tag.to_string(),
            digest,
            status,
        })
    }
}

fn require_image(image: &str) -> Result<&str> {
    let image = image.trim();
    if image.is_empty() {
        return Err(LrError::validation("Image name cannot be empty"));
    }
    Ok(image)
}

fn tags_path(image: &str) -> String {
    format!("/v2/{}/tags/list", image)
}

fn manifest_path(image: &str, reference: &str) -> String {
    format!("/v2/{}/manifests/{}", image, reference)
}
