//! Thin reqwest wrapper shared by every upstream call
//!
//! Owns the browser-like default headers, the TLS posture and the mapping
//! of reqwest failures onto [`AdapterError`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::error::AdapterError;

const JSON: &str = "application/json";
const JSON_API: &str = "application/vnd.api+json";

/// HTTP client bound to one upstream host.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build a client from the adapter configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, AdapterError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AdapterError::Config(format!("cannot build HTTP client: {}", e)))?;

        Url::parse(&config.base_url)
            .map_err(|e| AdapterError::Config(format!("invalid base url '{}': {}", config.base_url, e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for a site path, with optional query pairs.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, AdapterError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| AdapterError::Config(format!("invalid upstream url '{}': {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Resolve a link found in an upstream payload. Absolute links are kept,
    /// relative ones are anchored on the base URL.
    pub fn link(&self, href: &str) -> Result<Url, AdapterError> {
        match Url::parse(href) {
            Ok(url) => Ok(url),
            Err(_) => self.url(href, &[]),
        }
    }

    /// GET a page as text (the landing page HTML).
    pub async fn get_text(
        &self,
        endpoint: &'static str,
        url: Url,
        timeout: Duration,
    ) -> Result<String, AdapterError> {
        let response = self.send(endpoint, self.http.get(url).timeout(timeout)).await?;
        response
            .text()
            .await
            .map_err(|source| AdapterError::Transport { endpoint, source })
    }

    /// GET a plain JSON document.
    pub async fn get_json(
        &self,
        endpoint: &'static str,
        url: Url,
        timeout: Duration,
    ) -> Result<Value, AdapterError> {
        let response = self.send(endpoint, self.http.get(url).timeout(timeout)).await?;
        Self::decode(endpoint, response).await
    }

    /// GET a JSON:API document (instrument history collection).
    pub async fn get_json_api(
        &self,
        endpoint: &'static str,
        url: Url,
        timeout: Duration,
    ) -> Result<Value, AdapterError> {
        let request = self
            .http
            .get(url)
            .header(ACCEPT, JSON_API)
            .header(CONTENT_TYPE, JSON_API)
            .timeout(timeout);
        let response = self.send(endpoint, request).await?;
        Self::decode(endpoint, response).await
    }

    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, AdapterError> {
        let response = request
            .send()
            .await
            .map_err(|source| AdapterError::Transport { endpoint, source })?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), url = %response.url(), "Upstream response");

        if !status.is_success() {
            return Err(AdapterError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn decode(endpoint: &'static str, response: Response) -> Result<Value, AdapterError> {
        response.json::<Value>().await.map_err(|source| {
            if source.is_decode() {
                AdapterError::schema(endpoint, format!("invalid JSON: {}", source))
            } else {
                AdapterError::Transport { endpoint, source }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig::with_base_url(base)).unwrap()
    }

    #[test]
    fn test_url_joins_path_and_query() {
        let client = client("https://www.casablanca-bourse.com/");
        let url = client
            .url("/api/proxy/fr/api/bourse/dashboard/ticker", &[("marche", "59"), ("class[]", "50")])
            .unwrap();
        assert_eq!(url.path(), "/api/proxy/fr/api/bourse/dashboard/ticker");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("marche".to_string(), "59".to_string()),
                ("class[]".to_string(), "50".to_string())
            ]
        );
    }

    #[test]
    fn test_url_without_query_has_none() {
        let client = client("http://127.0.0.1:9000");
        let url = client.url("fr", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/fr");
        assert!(url.query().is_none());
    }

    #[test]
    fn test_link_keeps_absolute_and_anchors_relative() {
        let client = client("http://127.0.0.1:9000");
        assert_eq!(
            client.link("https://other.example/api/symbol/1").unwrap().as_str(),
            "https://other.example/api/symbol/1"
        );
        assert_eq!(
            client.link("/api/symbol/1").unwrap().as_str(),
            "http://127.0.0.1:9000/api/symbol/1"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = UpstreamClient::new(&UpstreamConfig::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, AdapterError::Config(_)));
    }
}
