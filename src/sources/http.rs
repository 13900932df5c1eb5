use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use serde::de::DeserializeOwned;

use super::{SourceError, SourceResult};

/// Mobile Safari; most origins serve lighter markup to it.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";

/// Desktop Chrome, for origins that hide results from mobile agents.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Blocking HTTP client shared by every adapter of a run.
///
/// Carries a fixed timeout and browser-like default headers. The underlying
/// `reqwest` client is cheap to clone.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(MOBILE_USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    fn check(url: &str, response: Response) -> SourceResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }

    /// GET `url` and return the body as text.
    pub fn get_text(&self, url: &str, referer: Option<&str>) -> SourceResult<String> {
        self.get_text_as(url, referer, None)
    }

    /// GET with an explicit user agent override.
    pub fn get_text_as(
        &self,
        url: &str,
        referer: Option<&str>,
        user_agent: Option<&str>,
    ) -> SourceResult<String> {
        let mut request = self.client.get(url);
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }
        if let Some(agent) = user_agent {
            request = request.header(reqwest::header::USER_AGENT, agent);
        }
        let response = Self::check(url, request.send()?)?;
        Ok(response.text()?)
    }

    /// GET `url` and decode the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str, referer: Option<&str>) -> SourceResult<T> {
        let body = self.get_text(url, referer)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a JSON body and return the response text.
    pub fn post_json(&self, url: &str, body: &serde_json::Value) -> SourceResult<String> {
        let response = Self::check(url, self.client.post(url).json(body).send()?)?;
        Ok(response.text()?)
    }
}
