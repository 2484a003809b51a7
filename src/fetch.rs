//! Wikipedia API client: the document-fetch collaborator.
//!
//! Fetches the raw wikitext of the source article through the MediaWiki
//! parse API. This is the only networked piece of the crate and lives
//! behind the `fetch` feature; the parsing core never sees an HTTP type.
//!
//! The API requires a descriptive User-Agent identifying the application,
//! or it answers 403. Keep the default contactable when deploying.

use std::time::Duration;

use tracing::info;

use crate::error::FetchError;

/// Configuration for the article fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// MediaWiki API endpoint.
    pub endpoint: String,
    /// Article title, with underscores for spaces.
    pub page: String,
    /// User-Agent header sent with the request.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            page: "List_of_countries_and_dependencies_by_population".to_string(),
            user_agent: "popquiz/0.1 (https://github.com/popquiz/popquiz)".to_string(),
            timeout_secs: 10,
        }
    }
}

impl FetchConfig {
    /// The full request URL: parse the page and return raw wikitext as JSON.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}?action=parse&page={}&prop=wikitext&format=json",
            self.endpoint, self.page
        )
    }
}

/// HTTP client for the MediaWiki parse API.
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: reqwest::Client,
    config: FetchConfig,
}

impl WikiClient {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FetchError::Request {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// Builds a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(FetchConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches the raw wikitext of the configured article.
    ///
    /// Navigates the API's nested JSON (`parse.wikitext.*`); any other
    /// body shape is an [`FetchError::UnexpectedShape`].
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on network failure, a non-2xx status, an
    /// unreadable body, or an unexpected response shape.
    pub async fn fetch_wikitext(&self) -> Result<String, FetchError> {
        info!(page = %self.config.page, "fetching article wikitext");

        let response = self
            .client
            .get(self.config.url())
            .send()
            .await
            .map_err(|e| FetchError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| FetchError::UnexpectedShape {
                message: format!("body is not JSON: {e}"),
            })?;

        let wikitext = body
            .get("parse")
            .and_then(|v| v.get("wikitext"))
            .and_then(|v| v.get("*"))
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| FetchError::UnexpectedShape {
                message: "missing parse.wikitext.* in API response".to_string(),
            })?;

        info!(chars = wikitext.len(), "fetched wikitext");
        Ok(wikitext.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert!(config.endpoint.contains("wikipedia.org"));
        assert!(config.page.contains("population"));
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.contains("popquiz"));
    }

    #[test]
    fn test_url_building() {
        let config = FetchConfig {
            endpoint: "https://example.org/w/api.php".to_string(),
            page: "Some_Page".to_string(),
            ..FetchConfig::default()
        };
        let url = config.url();
        assert_eq!(
            url,
            "https://example.org/w/api.php?action=parse&page=Some_Page&prop=wikitext&format=json"
        );
    }

    #[test]
    fn test_client_builds() {
        let client = WikiClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_wikitext_shape_navigation() {
        // The shape fetch_wikitext expects from the API
        let body: serde_json::Value = serde_json::json!({
            "parse": { "title": "x", "wikitext": { "*": "|-\n|row" } }
        });
        let wikitext = body
            .get("parse")
            .and_then(|v| v.get("wikitext"))
            .and_then(|v| v.get("*"))
            .and_then(serde_json::Value::as_str);
        assert_eq!(wikitext, Some("|-\n|row"));
    }
}
