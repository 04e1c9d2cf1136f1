//! Page source abstraction and API resource kinds
//!
//! This module defines the trait the inventory commands fetch pages through
//! and the errors a fetch can end in.

use crate::core::constants::{api, collection};
use crate::models::page::PageDocument;
use async_trait::async_trait;
use thiserror::Error;

/// Error types for page fetches
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Redirect from {0} has no usable Location header")]
    MissingLocation(String),

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Source of API pages
///
/// `Ok(None)` is an absent page: the fetch failed in a recoverable way and
/// the page contributes nothing. `Err` is reserved for failures that must
/// stop the whole run.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Option<PageDocument>, FetchError>;
}

/// Listings the tool reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Droplets,
    PrivateImages,
}

impl Resource {
    /// Endpoint path below the API root
    pub fn path(self) -> &'static str {
        match self {
            Resource::Droplets => api::DROPLETS_PATH,
            Resource::PrivateImages => api::IMAGES_PATH,
        }
    }

    /// Fixed query sent with every page request
    pub fn query(self) -> &'static str {
        match self {
            Resource::Droplets => "",
            Resource::PrivateImages => api::PRIVATE_IMAGES_QUERY,
        }
    }

    /// Top-level key holding the records in a page document
    pub fn collection(self) -> &'static str {
        match self {
            Resource::Droplets => collection::DROPLETS,
            Resource::PrivateImages => collection::IMAGES,
        }
    }
}
