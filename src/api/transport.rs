//! Network capability required by the scraper.

use async_trait::async_trait;

use crate::error::Result;

/// The three kinds of GET request the scraper issues.
///
/// `TikTokApi` is the production implementation. Everything above this
/// trait only sees response bodies and redirect targets, so the resolver
/// and both pagination loops can run against a scripted transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Origin that page and API paths are joined onto, without a trailing slash.
    fn base_url(&self) -> &str;

    /// Fetch an HTML page, following redirects, and return the body.
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// Issue a request without following redirects and return the
    /// `Location` header, if any.
    async fn fetch_location(&self, url: &str) -> Result<Option<String>>;

    /// Call a JSON endpoint with query parameters and return the raw body.
    ///
    /// Session cookies, when configured, are only attached here.
    async fn fetch_api(&self, url: &str, query: &[(&str, String)]) -> Result<String>;
}

#[cfg(test)]
pub(crate) mod scripted {
    //! In-memory transport replaying canned responses.

    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::Transport;
    use crate::error::{Error, Result};

    /// One recorded request: URL plus query pairs (empty for page fetches).
    pub type Call = (String, Vec<(String, String)>);

    #[derive(Default)]
    pub struct ScriptedTransport {
        base: String,
        pages: HashMap<String, String>,
        locations: HashMap<String, Option<String>>,
        api: Mutex<HashMap<String, VecDeque<std::result::Result<String, String>>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self {
                base: "https://www.tiktok.com".to_string(),
                ..Default::default()
            }
        }

        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        pub fn with_location(mut self, url: &str, location: Option<&str>) -> Self {
            self.locations
                .insert(url.to_string(), location.map(str::to_string));
            self
        }

        /// Queue a successful body for the next call to `url`.
        pub fn with_api(self, url: &str, body: &str) -> Self {
            self.push(url, Ok(body.to_string()));
            self
        }

        /// Queue `times` consecutive failures for `url`.
        pub fn with_api_failures(self, url: &str, times: usize) -> Self {
            for _ in 0..times {
                self.push(url, Err("connection reset".to_string()));
            }
            self
        }

        fn push(&self, url: &str, response: std::result::Result<String, String>) {
            self.api
                .lock()
                .unwrap()
                .entry(url.to_string())
                .or_default()
                .push_back(response);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn calls_to(&self, url: &str) -> Vec<Vec<(String, String)>> {
            self.calls()
                .into_iter()
                .filter(|(u, _)| u == url)
                .map(|(_, q)| q)
                .collect()
        }

        fn record(&self, url: &str, query: &[(&str, String)]) {
            let query = query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect();
            self.calls.lock().unwrap().push((url.to_string(), query));
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        fn base_url(&self) -> &str {
            &self.base
        }

        async fn fetch_page(&self, url: &str) -> Result<String> {
            self.record(url, &[]);
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| Error::Api(format!("unexpected page request: {}", url)))
        }

        async fn fetch_location(&self, url: &str) -> Result<Option<String>> {
            self.record(url, &[]);
            self.locations
                .get(url)
                .cloned()
                .ok_or_else(|| Error::Api(format!("unexpected redirect request: {}", url)))
        }

        async fn fetch_api(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
            self.record(url, query);
            let next = self
                .api
                .lock()
                .unwrap()
                .get_mut(url)
                .and_then(VecDeque::pop_front);

            match next {
                Some(Ok(body)) => Ok(body),
                Some(Err(message)) => Err(Error::Api(message)),
                None => Err(Error::Api(format!("no scripted response for {}", url))),
            }
        }
    }
}
