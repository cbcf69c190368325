use crate::config::ServiceConfig;
use crate::models::{ContentType, ParsedUrl};
use crate::services::{encode_query, parse, path_segments, MusicService};

const QUERY_PLACEHOLDER: &str = "{query}";

/// 설정 파일의 `[[services]]` 항목으로 정의한 서비스.
/// 경로 세그먼트 위치로 콘텐츠 종류와 ID를 꺼낸다.
#[derive(Debug, Clone)]
pub struct CustomService {
    name: String,
    domains: Vec<String>,
    icon: String,
    platform_key: String,
    result_key: String,
    search_url: String,
    type_segment: usize,
    id_segment: usize,
}

impl CustomService {
    /// Blank domains are dropped. The search template defaults to
    /// `https://<first domain>/search?q={query}`.
    pub fn new(name: impl Into<String>, domains: Vec<String>, platform_key: impl Into<String>) -> Self {
        let platform_key = platform_key.into();
        let domains = clean_domains(&domains);
        let search_url = domains
            .first()
            .map(|d| format!("https://{}/search?q={}", d, QUERY_PLACEHOLDER))
            .unwrap_or_default();
        Self {
            name: name.into(),
            domains,
            icon: ServiceConfig::default_icon(),
            result_key: platform_key.clone(),
            platform_key,
            search_url,
            type_segment: 0,
            id_segment: 1,
        }
    }

    /// Expects an entry that passed [`ServiceConfig::validate`].
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            name: config.name.clone(),
            domains: config.usable_domains(),
            icon: config.icon.clone(),
            platform_key: config.platform_key.clone(),
            result_key: config
                .result_key
                .clone()
                .unwrap_or_else(|| config.platform_key.clone()),
            search_url: config.search_url.clone(),
            type_segment: config.type_segment,
            id_segment: config.id_segment,
        }
    }

    pub fn with_search_url(mut self, template: impl Into<String>) -> Self {
        self.search_url = template.into();
        self
    }

    pub fn with_result_key(mut self, key: impl Into<String>) -> Self {
        self.result_key = key.into();
        self
    }
}

fn clean_domains(domains: &[String]) -> Vec<String> {
    domains
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

impl MusicService for CustomService {
    fn name(&self) -> &str {
        &self.name
    }

    fn domains(&self) -> Vec<&str> {
        self.domains.iter().map(String::as_str).collect()
    }

    fn icon(&self) -> &str {
        &self.icon
    }

    fn platform_key(&self) -> &str {
        &self.platform_key
    }

    fn result_key(&self) -> &str {
        &self.result_key
    }

    fn parse_url(&self, url: &str) -> ParsedUrl {
        let Some(parsed) = parse(url) else {
            return ParsedUrl::unknown(&self.name);
        };
        let segments = path_segments(&parsed);

        ParsedUrl {
            service: self.name.clone(),
            content_type: segments
                .get(self.type_segment)
                .map_or(ContentType::Unknown, |s| ContentType::from_segment(s)),
            id: segments
                .get(self.id_segment)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            region: None,
        }
    }

    // A template without the placeholder gets the query appended.
    fn generate_search_url(&self, query: &str) -> String {
        let encoded = encode_query(query);
        if self.search_url.contains(QUERY_PLACEHOLDER) {
            self.search_url.replace(QUERY_PLACEHOLDER, &encoded)
        } else {
            format!("{}{}", self.search_url, encoded)
        }
    }
}
