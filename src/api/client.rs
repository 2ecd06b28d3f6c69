//! TikTok web HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, redirect, Client, Response};
use url::Url;

use crate::api::auth::SessionCookies;
use crate::api::transport::Transport;
use crate::error::{Error, Result};

/// TikTok web origin.
pub const DEFAULT_BASE_URL: &str = "https://www.tiktok.com";

/// Desktop Chrome user agent presented on every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Referer sent to the JSON endpoints.
const API_REFERER: &str = "https://www.tiktok.com/";

/// TikTok HTTP client.
///
/// Holds two reqwest clients sharing the same user agent and timeout: one
/// that follows redirects for page fetches and one that stops at the first
/// response so redirect targets can be inspected.
pub struct TikTokApi {
    client: Client,
    no_redirect: Client,
    base_url: String,
    cookie_header: Option<header::HeaderValue>,
}

impl TikTokApi {
    /// Create a new client.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
        cookies: &SessionCookies,
    ) -> Result<Self> {
        // Reject garbage early rather than on the first request
        Url::parse(base_url)?;

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        let no_redirect = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        let cookie_header = cookies
            .header_value()
            .map(|value| {
                header::HeaderValue::from_str(&value)
                    .map_err(|e| Error::Config(format!("Invalid cookie value: {}", e)))
            })
            .transpose()?;

        Ok(Self {
            client,
            no_redirect,
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie_header,
        })
    }

    /// Whether requests to the JSON endpoints carry session cookies.
    pub fn is_authenticated(&self) -> bool {
        self.cookie_header.is_some()
    }

    /// Turn a JSON-API response into its body text.
    ///
    /// Error statuses that still carry a JSON object are passed through: the
    /// API reports failures in the body's `status_code`, which the caller
    /// inspects. Rate limiting and non-JSON error pages are errors.
    async fn read_api_body(url: &str, response: Response) -> Result<String> {
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == 429 {
            return Err(Error::Api(format!("Rate limited on {}", url)));
        }

        let text = response.text().await?;
        if status.is_success() {
            return Ok(text);
        }

        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) if value.is_object() => {
                tracing::debug!("HTTP {} from {} carries a JSON body", status, url);
                Ok(text)
            }
            _ => Err(Error::Api(format!("HTTP {} from {}", status, url))),
        }
    }
}

#[async_trait]
impl Transport for TikTokApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        tracing::debug!(
            "Page status: {} (final URL {})",
            response.status(),
            response.url()
        );

        // Error pages are scraped like any other; a missing secUid is the failure signal
        Ok(response.text().await?)
    }

    async fn fetch_location(&self, url: &str) -> Result<Option<String>> {
        tracing::debug!("GET {} (no redirects)", url);

        let response = self.no_redirect.get(url).send().await?;
        tracing::debug!("Response status: {}", response.status());

        let Some(location) = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
        else {
            return Ok(None);
        };

        // Relative redirects are resolved against the request URL
        let absolute = Url::parse(url)?.join(location).map_err(|e| {
            Error::Resolution(format!(
                "Invalid redirect target {:?} from {}: {}",
                location, url, e
            ))
        })?;
        Ok(Some(absolute.to_string()))
    }

    async fn fetch_api(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self
            .client
            .get(url)
            .query(query)
            .header(header::ACCEPT, "*/*")
            .header(header::REFERER, API_REFERER);

        if let Some(cookie) = &self.cookie_header {
            request = request.header(header::COOKIE, cookie.clone());
        }

        let response = request.send().await?;
        Self::read_api_body(url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header as header_eq, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer, cookies: &str) -> TikTokApi {
        TikTokApi::new(
            &server.uri(),
            DEFAULT_USER_AGENT,
            Duration::from_secs(5),
            &SessionCookies::parse(cookies),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_location_does_not_follow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/share/user/6812345678901"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", "https://www.tiktok.com/@bob?lang=en"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server, "");
        let location = api
            .fetch_location(&format!("{}/share/user/6812345678901", server.uri()))
            .await
            .unwrap();

        assert_eq!(location.as_deref(), Some("https://www.tiktok.com/@bob?lang=en"));
    }

    #[tokio::test]
    async fn test_fetch_location_resolves_relative() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/t/abc"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/@carol/video/1"))
            .mount(&server)
            .await;

        let api = api_for(&server, "");
        let location = api
            .fetch_location(&format!("{}/t/abc", server.uri()))
            .await
            .unwrap();

        assert_eq!(location, Some(format!("{}/@carol/video/1", server.uri())));
    }

    #[tokio::test]
    async fn test_fetch_location_missing_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("no redirect"))
            .mount(&server)
            .await;

        let api = api_for(&server, "");
        let location = api
            .fetch_location(&format!("{}/share/user/1", server.uri()))
            .await
            .unwrap();

        assert!(location.is_none());
    }

    #[tokio::test]
    async fn test_fetch_api_sends_headers_and_cookies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/collection_list/"))
            .and(query_param("secUid", "MS4wLjABabc"))
            .and(query_param("cursor", "0"))
            .and(header_eq("referer", API_REFERER))
            .and(header_eq("cookie", "sessionid=s1; msToken=t2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hasMore":false}"#))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server, "sessionid=s1; msToken=t2");
        assert!(api.is_authenticated());

        let body = api
            .fetch_api(
                &format!("{}/api/user/collection_list/", server.uri()),
                &[("secUid", "MS4wLjABabc".to_string()), ("cursor", "0".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(body, r#"{"hasMore":false}"#);
    }

    #[tokio::test]
    async fn test_fetch_api_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let api = api_for(&server, "");
        let err = api
            .fetch_api(&format!("{}/api/collection/item_list/", server.uri()), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(_)));
    }

    #[tokio::test]
    async fn test_fetch_api_passes_json_error_body_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string(r#"{"status_code":10201,"status_msg":"private"}"#),
            )
            .mount(&server)
            .await;

        let api = api_for(&server, "");
        let body = api
            .fetch_api(&format!("{}/api/collection/item_list/", server.uri()), &[])
            .await
            .unwrap();

        assert!(body.contains("10201"));
    }

    #[tokio::test]
    async fn test_fetch_api_rate_limit_is_error_even_with_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string(r#"{"status_code":0}"#))
            .mount(&server)
            .await;

        let api = api_for(&server, "");
        let err = api
            .fetch_api(&format!("{}/api/collection/item_list/", server.uri()), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api(_)));
    }

    #[tokio::test]
    async fn test_malformed_location_is_resolution_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "https://[bad"))
            .mount(&server)
            .await;

        let api = api_for(&server, "");
        let err = api
            .fetch_location(&format!("{}/share/user/6812345678901", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Resolution(_)));
    }

    #[tokio::test]
    async fn test_cookies_only_sent_to_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .mount(&server)
            .await;

        let api = api_for(&server, "sessionid=s1");
        api.fetch_page(&format!("{}/@alice", server.uri()))
            .await
            .unwrap();
        api.fetch_location(&format!("{}/share/user/1", server.uri()))
            .await
            .unwrap();
        api.fetch_api(&format!("{}/api/user/collection_list/", server.uri()), &[])
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let with_cookie: Vec<_> = requests
            .iter()
            .filter(|r| r.headers.get("cookie").is_some())
            .map(|r| r.url.path().to_string())
            .collect();
        assert_eq!(with_cookie, vec!["/api/user/collection_list/"]);
    }

    #[tokio::test]
    async fn test_fetch_page_follows_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/@dave"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/@dave"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#""secUid":"MS4wLjABdave""#))
            .mount(&server)
            .await;

        let api = api_for(&server, "");
        let body = api.fetch_page(&format!("{}/old", server.uri())).await.unwrap();

        assert!(body.contains("MS4wLjABdave"));
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let result = TikTokApi::new(
            "not a url",
            DEFAULT_USER_AGENT,
            Duration::from_secs(5),
            &SessionCookies::default(),
        );
        assert!(result.is_err());
    }
}
