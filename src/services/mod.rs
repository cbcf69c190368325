pub mod apple_music;
pub mod custom;
pub mod deezer;
pub mod registry;
pub mod spotify;
pub mod tidal;
pub mod youtube;
pub mod youtube_music;

use std::borrow::Cow;
use std::fmt;

use url::Url;

use crate::models::{LinkMetadata, ParsedUrl};

pub use apple_music::AppleMusic;
pub use custom::CustomService;
pub use deezer::Deezer;
pub use registry::ServiceRegistry;
pub use spotify::Spotify;
pub use tidal::Tidal;
pub use youtube::YouTube;
pub use youtube_music::YouTubeMusic;

/// 스트리밍 서비스 디스크립터 트레이트.
/// Apple Music, Spotify, YouTube 등 각 서비스의 URL 문법과 식별 정보를 이 트레이트로 추상화한다.
/// 디스크립터는 불변이며 프로세스 시작 시 한 번 만들어진다.
pub trait MusicService: Send + Sync {
    /// 서비스 표시 이름. 레지스트리 안에서 유일해야 한다.
    fn name(&self) -> &str;
    /// 이 서비스를 식별하는 호스트 이름 부분 문자열 목록.
    fn domains(&self) -> Vec<&str>;
    fn icon(&self) -> &str;
    /// 변환 API 응답의 `linksByPlatform` 키.
    fn platform_key(&self) -> &str;
    /// 변환 결과에서 이 서비스의 링크에 붙는 키.
    fn result_key(&self) -> &str;

    /// URL의 호스트가 도메인 중 하나를 포함하는지 확인한다.
    /// URL로 파싱할 수 없는 입력은 false.
    fn can_handle(&self, url: &str) -> bool {
        let Some(parsed) = parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        self.domains().iter().any(|domain| host.contains(domain))
    }

    /// URL을 서비스 문법에 따라 분해한다. 실패하면 `unknown` 결과를 돌려주며 패닉하지 않는다.
    fn parse_url(&self, url: &str) -> ParsedUrl;

    /// 검색어를 퍼센트 인코딩하여 서비스 검색 URL을 만든다.
    fn generate_search_url(&self, query: &str) -> String;
}

impl fmt::Debug for dyn MusicService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MusicService")
            .field("name", &self.name())
            .field("platform_key", &self.platform_key())
            .finish()
    }
}

/// Parse `input` as an absolute URL, `None` if it is not one.
pub(crate) fn parse(input: &str) -> Option<Url> {
    Url::parse(input.trim()).ok()
}

/// Non-empty `/`-delimited path segments.
pub(crate) fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// First value of query parameter `key`.
pub(crate) fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub(crate) fn encode_query(query: &str) -> Cow<'_, str> {
    urlencoding::encode(query)
}

/// Build a search query from parsed URL info and optional metadata.
///
/// Uses "Artist Title" when both are known, otherwise falls back to the
/// parsed ID.
pub fn build_search_query(parsed: &ParsedUrl, metadata: Option<&LinkMetadata>) -> String {
    if let Some(meta) = metadata {
        if let (Some(artist), Some(title)) = (&meta.artist, &meta.title) {
            return format!("{} {}", artist, title);
        }
    }
    parsed.id.clone()
}
