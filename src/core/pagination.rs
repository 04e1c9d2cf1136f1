//! Page URL construction and page collection

use crate::core::provider::{FetchError, PageSource, Resource};
use crate::models::page::PageDocument;
use tracing::debug;

/// Build the URLs for pages `1..=page_count` of `endpoint`
///
/// Each URL is `<endpoint>?<query>&page=<n>&per_page=<per_page>`; an empty
/// query is left out together with its separator.
pub fn paginate(endpoint: &str, query: &str, page_count: u32, per_page: u32) -> Vec<String> {
    (1..=page_count)
        .map(|page| {
            if query.is_empty() {
                format!("{}?page={}&per_page={}", endpoint, page, per_page)
            } else {
                format!("{}?{}&page={}&per_page={}", endpoint, query, page, per_page)
            }
        })
        .collect()
}

/// Builds page URLs for API resources
#[derive(Debug, Clone)]
pub struct Paginator {
    base_url: String,
    per_page: u32,
}

impl Paginator {
    pub fn new(base_url: &str, per_page: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page,
        }
    }

    pub fn page_urls(&self, resource: Resource, page_count: u32) -> Vec<String> {
        let endpoint = format!("{}/{}", self.base_url, resource.path());
        paginate(&endpoint, resource.query(), page_count, self.per_page)
    }
}

/// Fetch every URL in order, keeping the pages that arrived
///
/// Absent pages are skipped. The first fatal error stops the collection and
/// discards what was gathered so far.
pub async fn collect_pages<S>(source: &S, urls: &[String]) -> Result<Vec<PageDocument>, FetchError>
where
    S: PageSource + ?Sized,
{
    let mut pages = Vec::with_capacity(urls.len());
    for url in urls {
        match source.fetch_page(url).await? {
            Some(page) => pages.push(page),
            None => debug!("No page collected from {}", url),
        }
    }
    Ok(pages)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory page source keyed by URL
    ///
    /// URLs without a page are absent. Every fetch is recorded.
    #[derive(Default)]
    pub struct StaticPages {
        pages: HashMap<String, Value>,
        unauthorized: Vec<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl StaticPages {
        pub fn with_page(mut self, url: &str, body: Value) -> Self {
            self.pages.insert(url.to_string(), body);
            self
        }

        pub fn with_unauthorized(mut self, url: &str) -> Self {
            self.unauthorized.push(url.to_string());
            self
        }
    }

    #[async_trait]
    impl PageSource for StaticPages {
        async fn fetch_page(&self, url: &str) -> Result<Option<PageDocument>, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());
            if self.unauthorized.iter().any(|u| u == url) {
                return Err(FetchError::Unauthorized("denied".to_string()));
            }
            Ok(self.pages.get(url).cloned().map(PageDocument::new))
        }
    }

    #[test]
    fn test_paginate_counts_and_orders_pages() {
        for page_count in 1..=5u32 {
            let urls = paginate("https://api.example.com/v2/droplets", "", page_count, 999);
            assert_eq!(urls.len(), page_count as usize);
            for (i, url) in urls.iter().enumerate() {
                assert!(url.ends_with(&format!("?page={}&per_page=999", i + 1)));
            }
        }
    }

    #[test]
    fn test_paginate_with_query() {
        let urls = paginate("https://api.example.com/v2/images", "private=true", 2, 999);
        assert_eq!(
            urls,
            vec![
                "https://api.example.com/v2/images?private=true&page=1&per_page=999",
                "https://api.example.com/v2/images?private=true&page=2&per_page=999",
            ]
        );
    }

    #[test]
    fn test_paginator_resources() {
        let paginator = Paginator::new("https://api.digitalocean.com/v2/", 999);
        assert_eq!(
            paginator.page_urls(Resource::Droplets, 1),
            vec!["https://api.digitalocean.com/v2/droplets?page=1&per_page=999"]
        );
        assert_eq!(
            paginator.page_urls(Resource::PrivateImages, 1),
            vec!["https://api.digitalocean.com/v2/images?private=true&page=1&per_page=999"]
        );
    }

    #[tokio::test]
    async fn test_collect_skips_absent_pages() {
        let source = StaticPages::default()
            .with_page("p1", json!({"droplets": [{"id": 1}]}))
            .with_page("p3", json!({"droplets": [{"id": 3}]}));
        let urls: Vec<String> = ["p1", "p2", "p3"].iter().map(|s| s.to_string()).collect();

        let pages = collect_pages(&source, &urls).await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(*source.calls.lock().unwrap(), urls);
    }

    #[tokio::test]
    async fn test_collect_stops_on_fatal_error() {
        let source = StaticPages::default()
            .with_page("p1", json!({"droplets": []}))
            .with_unauthorized("p2")
            .with_page("p3", json!({"droplets": []}));
        let urls: Vec<String> = ["p1", "p2", "p3"].iter().map(|s| s.to_string()).collect();

        let result = collect_pages(&source, &urls).await;

        assert!(matches!(result, Err(FetchError::Unauthorized(_))));
        assert_eq!(source.calls.lock().unwrap().len(), 2);
    }
}
