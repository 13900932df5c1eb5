use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{SourceError, SourceResult};

/// Connection settings of a Browserless-compatible rendering service.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserlessSettings {
    /// Base URL, e.g. `http://localhost:3000`. Unset disables rendering.
    pub base_url: Option<String>,
    pub token: Option<String>,
    /// Navigation timeout inside the headless browser, in milliseconds.
    #[serde(default = "default_navigation_ms")]
    pub navigation_timeout_ms: u64,
    /// Extra settle time after DOM content is loaded, in milliseconds.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_navigation_ms() -> u64 {
    25_000
}

fn default_settle_ms() -> u64 {
    3_000
}

impl Default for BrowserlessSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            navigation_timeout_ms: default_navigation_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

/// Client for the `/content` endpoint, which returns the fully rendered
/// HTML of a page. Each call is one headless session, closed by the
/// service when the response is sent.
pub struct BrowserlessClient {
    client: Client,
    endpoint: String,
    navigation_timeout_ms: u64,
    settle_ms: u64,
}

impl BrowserlessClient {
    pub fn from_settings(settings: &BrowserlessSettings) -> SourceResult<Self> {
        let base_url = settings
            .base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(SourceError::NotConfigured("browserless"))?;

        let mut endpoint = format!("{}/content", base_url.trim_end_matches('/'));
        if let Some(token) = settings.token.as_deref().filter(|t| !t.is_empty()) {
            endpoint.push_str(&format!("?token={token}"));
        }

        let session_budget = settings.navigation_timeout_ms + settings.settle_ms + 5_000;
        let client = Client::builder()
            .timeout(Duration::from_millis(session_budget))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            navigation_timeout_ms: settings.navigation_timeout_ms,
            settle_ms: settings.settle_ms,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request body sent to `/content` for `url`.
    pub fn content_request(&self, url: &str) -> serde_json::Value {
        serde_json::json!({
            "url": url,
            "gotoOptions": {
                "waitUntil": "domcontentloaded",
                "timeout": self.navigation_timeout_ms,
            },
            "waitForTimeout": self.settle_ms,
        })
    }

    /// Fetch the rendered HTML of `url`.
    pub fn content(&self, url: &str) -> SourceResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.content_request(url))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }
        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_service_is_reported() {
        let err = BrowserlessClient::from_settings(&BrowserlessSettings::default())
            .err()
            .unwrap();
        assert!(matches!(err, SourceError::NotConfigured("browserless")));
    }

    #[test]
    fn builds_endpoint_with_token() {
        let client = BrowserlessClient::from_settings(&BrowserlessSettings {
            base_url: Some("http://localhost:3000/".into()),
            token: Some("secret".into()),
            navigation_timeout_ms: 25_000,
            settle_ms: 3_000,
        })
        .unwrap();

        assert_eq!(client.endpoint(), "http://localhost:3000/content?token=secret");
        let body = client.content_request("https://www.xiaohongshu.com/search_result");
        assert_eq!(body["gotoOptions"]["timeout"], 25_000);
        assert_eq!(body["waitForTimeout"], 3_000);
    }
}
