use futures::StreamExt;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::types::{page_offset, CatalogEntry, CatalogPage, RawListing, RawRecord, PAGE_SIZE};

/// Public PokeAPI endpoint used when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Listing and record bodies are a few KB; anything near this is not a catalog response.
const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from the remote catalog.
///
/// Transport problems (`Network`, `Timeout`), non-2xx statuses (`HttpStatus`),
/// malformed bodies (`Parse`) and the semantic "no such entry" (`NotFound`)
/// are kept apart so the UI can word its message accordingly.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request timed out")]
    Timeout,
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Malformed response: {0}")]
    Parse(String),
    #[error("No entry named '{0}'")]
    NotFound(String),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// True for failures of the transport rather than of the request itself.
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Timeout)
    }
}

/// Build the shared HTTP client.
///
/// Limits redirects to 3 hops and rejects loops, pools connections to the
/// single API host, and applies `timeout` to every request.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let policy = Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );
        attempt.follow()
    });

    let client = reqwest::Client::builder()
        .redirect(policy)
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Thin client over the remote catalog API.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl CatalogClient {
    /// Create a client rooted at `base_url` (e.g. `https://pokeapi.co/api/v2`).
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, FetchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch one listing page. `page` is 1-based; page 0 is treated as page 1.
    pub async fn fetch_page(&self, page: u32) -> Result<CatalogPage, FetchError> {
        let offset = page_offset(page);

        let mut url = self.endpoint(&["pokemon"])?;
        url.query_pairs_mut()
            .append_pair("limit", &PAGE_SIZE.to_string())
            .append_pair("offset", &offset.to_string());

        tracing::debug!(page, offset, "Fetching catalog page");
        let listing: RawListing = self.get_json(url).await?;
        let page = listing.into_page(offset);
        tracing::debug!(
            entries = page.entries.len(),
            total = page.total_count,
            "Catalog page loaded"
        );
        Ok(page)
    }

    /// Look up a single entry by exact name or numeric id.
    pub async fn fetch_by_identifier(&self, identifier: &str) -> Result<CatalogEntry, FetchError> {
        let url = self.endpoint(&["pokemon", identifier])?;

        let record: RawRecord = match self.get_json(url).await {
            Err(FetchError::HttpStatus(404)) => {
                tracing::debug!(identifier, "Catalog lookup found nothing");
                return Err(FetchError::NotFound(identifier.to_string()));
            }
            other => other?,
        };

        let detail_url = self.endpoint(&["pokemon", &record.id.to_string(), ""])?;
        Ok(CatalogEntry {
            id: record.id,
            name: record.name,
            detail_url: detail_url.to_string(),
        })
    }

    /// Fetch an entry's full record and return its first move names.
    pub async fn fetch_detail(&self, detail_url: &str) -> Result<Vec<String>, FetchError> {
        let url = Url::parse(detail_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{detail_url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(detail_url.to_string()));
        }

        let record: RawRecord = self.get_json(url).await?;
        Ok(record.move_names())
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = tokio::time::timeout(self.timeout, self.http.get(url.clone()).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Catalog request failed");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(reqwest::Client::new(), base).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let c = client("https://pokeapi.co/api/v2");
        let url = c.endpoint(&["pokemon", "25"]).unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/25");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash_base() {
        let c = client("https://pokeapi.co/api/v2/");
        let url = c.endpoint(&["pokemon"]).unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon");
    }

    #[test]
    fn test_endpoint_encodes_identifier() {
        let c = client("https://pokeapi.co/api/v2");
        let url = c.endpoint(&["pokemon", "../berry"]).unwrap();
        assert!(url.as_str().starts_with("https://pokeapi.co/api/v2/pokemon/"));
        assert!(!url.as_str().contains("/berry"));
    }

    #[test]
    fn test_detail_endpoint_has_trailing_slash() {
        let c = client("https://pokeapi.co/api/v2");
        let url = c.endpoint(&["pokemon", "4", ""]).unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/pokemon/4/");
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(matches!(
            CatalogClient::new(reqwest::Client::new(), "ftp://example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            CatalogClient::new(reqwest::Client::new(), "mailto:someone@example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_is_network() {
        assert!(FetchError::Timeout.is_network());
        assert!(!FetchError::HttpStatus(500).is_network());
        assert!(!FetchError::NotFound("x".into()).is_network());
    }

    #[tokio::test]
    async fn test_fetch_detail_rejects_invalid_url() {
        let c = client("https://pokeapi.co/api/v2");
        assert!(matches!(
            c.fetch_detail("not-a-url").await,
            Err(FetchError::InvalidUrl(_))
        ));
        assert!(matches!(
            c.fetch_detail("file:///etc/passwd").await,
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
