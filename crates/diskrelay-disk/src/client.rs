//! Disk API client implementation.

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, warn};
use url::Url;

use crate::error::{ApiError, Result};
use crate::models::{
    DownloadLinkResponse, DownloadTicket, Listing, ListingResponse, DEFAULT_FILENAME,
};

/// Timeout applied to every outbound call (listing, link resolution, byte
/// fetch). The original design had none; a bounded wait is required to
/// avoid hanging a request on an unresponsive upstream.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the public-resource endpoints of the Disk API.
///
/// Performs one outbound HTTP call per operation, no retries, no caching.
/// The pre-signed href fetch is the only unauthenticated call.
#[derive(Debug, Clone)]
pub struct DiskClient {
    /// HTTP client, shared across clones.
    http: reqwest::Client,

    /// Base URL of the Disk API.
    base_url: Url,

    /// Timeout applied to each outbound call.
    timeout: Duration,
}

impl DiskClient {
    /// Create a client against the given API base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Override the outbound-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Fetch a directory listing for a public resource.
    ///
    /// `GET /v1/disk/public/resources` with `Authorization: OAuth <token>`.
    /// Items come back in the order the remote API returned them.
    pub async fn list(&self, access_token: &str, public_key: &str, path: &str) -> Result<Listing> {
        let url = self.endpoint("/v1/disk/public/resources")?;
        let response = self
            .http
            .get(url)
            .query(&[("public_key", public_key), ("path", path)])
            .header("Authorization", format!("OAuth {access_token}"))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), public_key, "listing request failed");
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ListingResponse = response.json().await.map_err(|e| ApiError::Upstream {
            status: status.as_u16(),
            body: format!("unparseable listing body: {e}"),
        })?;

        let items = parsed.embedded.unwrap_or_default().items;
        debug!(public_key, count = items.len(), "listing fetched");

        Ok(Listing {
            current_path: parsed.path,
            items,
        })
    }

    /// Resolve the pre-signed download link for a file.
    ///
    /// Any non-200 response, and a 200 whose body lacks `href`, both mean
    /// no usable link.
    pub async fn resolve_download(
        &self,
        access_token: &str,
        public_key: &str,
        path: &str,
    ) -> Result<DownloadTicket> {
        let url = self.endpoint("/v1/disk/public/resources/download")?;
        let response = self
            .http
            .get(url)
            .query(&[("public_key", public_key), ("path", path)])
            .header("Authorization", format!("OAuth {access_token}"))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), public_key, "link resolution failed");
            return Err(ApiError::NoDownloadLink);
        }

        let parsed: DownloadLinkResponse = response
            .json()
            .await
            .map_err(|_| ApiError::NoDownloadLink)?;

        match parsed.href {
            Some(href) => Ok(DownloadTicket {
                href,
                filename: parsed
                    .filename
                    .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
            }),
            None => Err(ApiError::NoDownloadLink),
        }
    }

    /// Fetch the raw bytes behind a resolved ticket.
    ///
    /// The href is pre-signed and time-limited; no Authorization header is
    /// sent. Bytes are returned untouched.
    pub async fn fetch(&self, href: &str) -> Result<Bytes> {
        let response = self.http.get(href).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "byte fetch failed");
            return Err(ApiError::DownloadFailed(status.as_u16()));
        }

        Ok(response.bytes().await?)
    }

    /// Resolve and fetch a file in one operation.
    ///
    /// Both parameters are mandatory; an empty one fails fast before any
    /// outbound call. The two sub-calls stay strictly sequential since the
    /// fetch depends on the resolved href.
    pub async fn download(
        &self,
        access_token: &str,
        public_key: &str,
        path: &str,
    ) -> Result<(Bytes, String)> {
        if public_key.is_empty() {
            return Err(ApiError::InvalidRequest("public_key is required".into()));
        }
        if path.is_empty() {
            return Err(ApiError::InvalidRequest("path is required".into()));
        }

        let ticket = self.resolve_download(access_token, public_key, path).await?;
        let bytes = self.fetch(&ticket.href).await?;
        Ok((bytes, ticket.filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceKind;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing_body() -> serde_json::Value {
        serde_json::json!({
            "path": "/photos",
            "_embedded": {
                "items": [
                    {"name": "a.png", "path": "/photos/a.png", "type": "file",
                     "mime_type": "image/png"},
                    {"name": "inner", "path": "/photos/inner", "type": "dir"},
                    {"name": "b.txt", "path": "/photos/b.txt", "type": "file",
                     "mime_type": "text/plain"},
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_list_parses_items_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources"))
            .and(query_param("public_key", "K"))
            .and(query_param("path", "/photos"))
            .and(header("Authorization", "OAuth T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let listing = client.list("T", "K", "/photos").await.unwrap();

        assert_eq!(listing.current_path, "/photos");
        assert_eq!(listing.items.len(), 3);
        assert_eq!(listing.items[0].name, "a.png");
        assert_eq!(listing.items[1].kind, ResourceKind::Dir);
        assert_eq!(listing.items[2].name, "b.txt");
    }

    #[tokio::test]
    async fn test_list_upstream_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources"))
            .respond_with(ResponseTemplate::new(404).set_body_string("resource not found"))
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let err = client.list("T", "K", "/gone").await.unwrap_err();

        match err {
            ApiError::Upstream { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "resource not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_without_embedded_section() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"path": "/"})),
            )
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let listing = client.list("T", "K", "/").await.unwrap();
        assert!(listing.items.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_download_success_with_filename() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources/download"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "href": "https://downloader.example/f",
                "filename": "a.txt",
            })))
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let ticket = client.resolve_download("T", "K", "/a.txt").await.unwrap();
        assert_eq!(ticket.href, "https://downloader.example/f");
        assert_eq!(ticket.filename, "a.txt");
    }

    #[tokio::test]
    async fn test_resolve_download_filename_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources/download"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "href": "https://downloader.example/f",
            })))
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let ticket = client.resolve_download("T", "K", "/f").await.unwrap();
        assert_eq!(ticket.filename, DEFAULT_FILENAME);
    }

    #[tokio::test]
    async fn test_resolve_download_missing_href() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources/download"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let err = client.resolve_download("T", "K", "/f").await.unwrap_err();
        assert!(matches!(err, ApiError::NoDownloadLink));
    }

    #[tokio::test]
    async fn test_resolve_download_non_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources/download"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let err = client.resolve_download("T", "K", "/f").await.unwrap_err();
        assert!(matches!(err, ApiError::NoDownloadLink));
    }

    #[tokio::test]
    async fn test_download_byte_passthrough() {
        let server = MockServer::start().await;
        let payload: &[u8] = b"\x00\x01binary payload\xff";

        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources/download"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "href": format!("{}/signed/blob", server.uri()),
                "filename": "a.txt",
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/signed/blob"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload))
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let (bytes, filename) = client.download("T", "K", "/a.txt").await.unwrap();

        assert_eq!(&bytes[..], payload);
        assert_eq!(filename, "a.txt");
    }

    #[tokio::test]
    async fn test_download_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources/download"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "href": format!("{}/signed/blob", server.uri()),
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/signed/blob"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();
        let err = client.download("T", "K", "/f").await.unwrap_err();
        assert!(matches!(err, ApiError::DownloadFailed(410)));
    }

    #[tokio::test]
    async fn test_list_slow_upstream_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/disk/public/resources"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(listing_body())
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri())
            .unwrap()
            .with_timeout(Duration::from_millis(50));
        let err = client.list("T", "K", "/photos").await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout));
    }

    #[tokio::test]
    async fn test_download_missing_params_fail_before_network() {
        let server = MockServer::start().await;
        // Fail the test if anything reaches the mock server
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = DiskClient::new(&server.uri()).unwrap();

        let err = client.download("T", "", "/f").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        let err = client.download("T", "K", "").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
