use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.song.link/v1-alpha.1/links";
pub const DEFAULT_USER_AGENT: &str = "Music-Link-Translator/1.0";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub songlink: SongLinkConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongLinkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub user_country: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SongLinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_country: None,
            api_key: None,
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SongLinkConfig {
    /// Request timeout, never shorter than one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// `MUSICLINK_API_KEY` / `MUSICLINK_USER_COUNTRY` take precedence over the file.
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("MUSICLINK_API_KEY") {
            if !key.is_empty() {
                self.api_key = Some(key);
            }
        }
        if let Ok(country) = std::env::var("MUSICLINK_USER_COUNTRY") {
            if !country.is_empty() {
                self.user_country = Some(country);
            }
        }
    }
}

/// 설정 파일로 추가하는 서비스 정의 (`[[services]]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub domains: Vec<String>,
    #[serde(default = "ServiceConfig::default_icon")]
    pub icon: String,
    pub platform_key: String,
    /// Defaults to `platform_key`.
    pub result_key: Option<String>,
    /// Search URL template, `{query}` is replaced by the encoded query.
    #[serde(default)]
    pub search_url: String,
    #[serde(default)]
    pub type_segment: usize,
    #[serde(default = "default_id_segment")]
    pub id_segment: usize,
}

impl ServiceConfig {
    pub fn default_icon() -> String {
        "🎶".to_string()
    }

    /// Domains with surrounding whitespace trimmed and blank entries removed.
    pub fn usable_domains(&self) -> Vec<String> {
        self.domains
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// 레지스트리에 등록할 수 있는 항목인지 확인한다.
    ///
    /// 빈 도메인은 모든 호스트와 일치하므로 쓸 수 있는 도메인이 하나는 있어야 하고,
    /// 검색 템플릿은 검색어를 넣었을 때 절대 URL이 되어야 한다.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.usable_domains().is_empty() {
            return Err("no usable domains".to_string());
        }
        let sample = if self.search_url.contains("{query}") {
            self.search_url.replace("{query}", "q")
        } else {
            format!("{}q", self.search_url)
        };
        match url::Url::parse(&sample) {
            Ok(parsed) if parsed.has_host() => Ok(()),
            Ok(_) => Err(format!("search_url has no host: {:?}", self.search_url)),
            Err(e) => Err(format!("invalid search_url {:?}: {}", self.search_url, e)),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_id_segment() -> usize {
    1
}

/// `$MUSICLINK_CONFIG` if set, otherwise `<config dir>/musiclink/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("MUSICLINK_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("musiclink").join("config.toml"))
}

/// 설정 파일을 읽는다. 파일이 없거나 읽을 수 없으면 기본값을 쓴다.
pub fn load_config() -> Config {
    let mut config = match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::warn!("no config directory, using defaults");
            Config::default()
        }
    };
    config.songlink.apply_env();
    config
}

pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) => {
            tracing::warn!(path = %path.display(), "config unreadable: {}", e);
            Config::default()
        }
    }
}

fn parse_config(content: &str) -> Config {
    toml::from_str(content).unwrap_or_else(|e| {
        tracing::warn!("invalid config, using defaults: {}", e);
        Config::default()
    })
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path().context("설정 디렉토리를 찾을 수 없습니다")?;
    save_config_to(&path, config)
}

/// Write through a temp file and rename, so a failed write keeps the old file.
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("설정 디렉토리를 만들 수 없습니다: {}", dir.display()))?;
    }
    let content = toml::to_string_pretty(config).context("설정 직렬화에 실패했습니다")?;
    let temp = path.with_extension("toml.tmp");
    std::fs::write(&temp, content)
        .with_context(|| format!("설정 파일을 쓸 수 없습니다: {}", temp.display()))?;
    std::fs::rename(&temp, path)
        .with_context(|| format!("설정 파일을 저장할 수 없습니다: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}
