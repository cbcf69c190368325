use std::fmt;

use tracing::{debug, warn};
use url::Url;

use crate::config::SongLinkConfig;
use crate::error::{Result, TranslateError};
use crate::songlink::dto::SongLinkResponse;

/// Song.link API 클라이언트.
/// 인증 없이도 동작하며, API 키가 있으면 `key` 파라미터로 보낸다.
pub struct SongLinkClient {
    client: reqwest::blocking::Client,
    config: SongLinkConfig,
}

impl fmt::Debug for SongLinkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SongLinkClient")
            .field("base_url", &self.config.base_url)
            .field("user_country", &self.config.user_country)
            .field("has_api_key", &self.config.has_api_key())
            .finish_non_exhaustive()
    }
}

impl SongLinkClient {
    pub fn new(config: &SongLinkConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| TranslateError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Request URL for `url`, with `userCountry` and `key` when configured.
    pub fn request_url(&self, url: &str) -> Result<Url> {
        let mut request = Url::parse(&self.config.base_url)
            .map_err(|e| TranslateError::InvalidUrl(e.to_string()))?;
        {
            let mut query = request.query_pairs_mut();
            query.append_pair("url", url);
            if let Some(country) = self.config.user_country.as_deref().filter(|c| !c.is_empty()) {
                query.append_pair("userCountry", country);
            }
            if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) {
                query.append_pair("key", key);
            }
        }
        Ok(request)
    }

    /// 입력 URL에 대응하는 다른 플랫폼 링크를 조회한다.
    pub fn fetch_links(&self, url: &str) -> Result<SongLinkResponse> {
        let url = url.trim();
        if url.is_empty() {
            return Err(TranslateError::InvalidUrl("URL이 비어 있습니다".to_string()));
        }

        let request = self.request_url(url)?;
        debug!(url, "requesting song.link");

        let response = self.client.get(request).send().map_err(|e| {
            warn!("song.link request failed: {}", e);
            TranslateError::Network(e)
        })?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "song.link returned an error");
            return Err(TranslateError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        parse_response(&body)
    }
}

/// Parse a response body. Non-JSON is an upstream failure; JSON in the wrong
/// shape is a malformed response.
pub fn parse_response(body: &str) -> Result<SongLinkResponse> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(TranslateError::InvalidBody)?;
    serde_json::from_value(value).map_err(|e| TranslateError::malformed(e.to_string()))
}

/// `message` or `error` field of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
