//! DigitalOcean API client
//!
//! Issues one authenticated GET per page. Automatic redirects are disabled;
//! a 307 is followed once by hand through its `Location` header.

use crate::core::config::Config;
use crate::core::provider::{FetchError, PageSource};
use crate::models::page::PageDocument;
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Client, Response, StatusCode, Url, redirect};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// DigitalOcean API client
pub struct DigitalOceanClient {
    client: Client,
    api_token: String,
    exit_on_unauthorized: bool,
}

impl DigitalOceanClient {
    /// Create a new client from the application configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_token: config.api_token.clone(),
            exit_on_unauthorized: config.exit_on_unauthorized,
        })
    }

    /// Fetch and parse one page
    ///
    /// # Errors
    ///
    /// Every failure is reported, including ones [`PageSource::fetch_page`]
    /// later downgrades to an absent page.
    pub async fn fetch(&self, url: &str) -> Result<PageDocument, FetchError> {
        let url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let response = self.get(&url).await?;
        let response = if response.status() == StatusCode::TEMPORARY_REDIRECT {
            let target = Self::redirect_target(&url, &response)?;
            debug!("Following redirect from {} to {}", url, target);
            self.get(&target).await?
        } else {
            response
        };

        Self::into_page(response).await
    }

    async fn get(&self, url: &Url) -> Result<Response, FetchError> {
        debug!("GET {}", url);
        self.client
            .get(url.clone())
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    /// Resolve the `Location` of a redirect against the request URL
    fn redirect_target(url: &Url, response: &Response) -> Result<Url, FetchError> {
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|location| url.join(location).ok())
            .ok_or_else(|| FetchError::MissingLocation(url.to_string()))
    }

    async fn into_page(response: Response) -> Result<PageDocument, FetchError> {
        let status = response.status();
        let url = response.url().to_string();

        match status {
            StatusCode::OK => {
                let body: Value = response
                    .json()
                    .await
                    .map_err(|e| FetchError::Decode(e.to_string()))?;
                Ok(PageDocument::new(body))
            }
            StatusCode::UNAUTHORIZED => {
                let detail = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(FetchError::Unauthorized(Self::classify_unauthorized(
                    &detail,
                )))
            }
            _ => Err(FetchError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }

    /// Turn a 401 body into a helpful message
    fn classify_unauthorized(error_detail: &str) -> String {
        let error_lower = error_detail.to_lowercase();

        if error_lower.contains("unable to authenticate") || error_lower.contains("unauthorized") {
            return "Invalid API token. Please check your DO_API_TOKEN.".to_string();
        }

        if error_detail.trim().is_empty() {
            return "The API rejected the request without a reason".to_string();
        }

        error_detail.to_string()
    }
}

#[async_trait]
impl PageSource for DigitalOceanClient {
    async fn fetch_page(&self, url: &str) -> Result<Option<PageDocument>, FetchError> {
        match self.fetch(url).await {
            Ok(page) => Ok(Some(page)),
            Err(FetchError::Unauthorized(message)) if self.exit_on_unauthorized => {
                Err(FetchError::Unauthorized(message))
            }
            Err(e) => {
                warn!("Skipping page {}: {}", url, e);
                Ok(None)
            }
        }
    }
}
