use std::fmt;

use serde::Serialize;

/// 링크가 가리키는 콘텐츠 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Track,
    Album,
    Playlist,
    Artist,
    #[default]
    Unknown,
}

impl ContentType {
    /// Map a URL path segment onto a content type.
    ///
    /// Apple Music uses `song` for single tracks. Anything else that is not
    /// one of the known names becomes `Unknown`.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "track" | "song" => Self::Track,
            "album" => Self::Album,
            "playlist" => Self::Playlist,
            "artist" => Self::Artist,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Playlist => "playlist",
            Self::Artist => "artist",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 한 서비스의 URL 문법으로 분해한 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    pub service: String,
    pub content_type: ContentType,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ParsedUrl {
    /// Result for a URL the service could not make sense of.
    pub fn unknown(service: &str) -> Self {
        Self {
            service: service.to_string(),
            content_type: ContentType::Unknown,
            id: String::new(),
            region: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.content_type == ContentType::Unknown && self.id.is_empty()
    }
}

/// 변환 API가 돌려준 첫 번째 엔티티의 공용 메타데이터.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl LinkMetadata {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("알 수 없음")
    }

    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or("알 수 없음")
    }

    pub fn summary(&self) -> String {
        format!("{} - {}", self.display_artist(), self.display_title())
    }
}

/// One service's link in a translation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    /// Descriptor display name.
    pub service: String,
    /// Descriptor result key (`apple`, `spotify`, ...).
    pub key: String,
    pub url: String,
}

/// 외부 API 응답을 로컬 형태로 옮긴 변환 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedLinks {
    pub original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LinkMetadata>,
    pub entries: Vec<LinkEntry>,
}

impl TranslatedLinks {
    /// Link for the service with the given display name.
    pub fn url_for(&self, service: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.service == service)
            .map(|e| e.url.as_str())
    }

    /// Link for the service with the given result key.
    pub fn url_for_key(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.url.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_segment() {
        assert_eq!(ContentType::from_segment("track"), ContentType::Track);
        assert_eq!(ContentType::from_segment("song"), ContentType::Track);
        assert_eq!(ContentType::from_segment("album"), ContentType::Album);
        assert_eq!(ContentType::from_segment("episode"), ContentType::Unknown);
        assert_eq!(ContentType::from_segment(""), ContentType::Unknown);
    }

    #[test]
    fn test_lookup_by_name_and_key() {
        let links = TranslatedLinks {
            original: "https://open.spotify.com/track/1".to_string(),
            metadata: None,
            entries: vec![LinkEntry {
                service: "Apple Music".to_string(),
                key: "apple".to_string(),
                url: "https://music.apple.com/us/album/x/1".to_string(),
            }],
        };
        assert_eq!(
            links.url_for("Apple Music"),
            Some("https://music.apple.com/us/album/x/1")
        );
        assert_eq!(
            links.url_for_key("apple"),
            Some("https://music.apple.com/us/album/x/1")
        );
        assert!(links.url_for("Spotify").is_none());
    }

    #[test]
    fn test_metadata_summary() {
        let meta = LinkMetadata {
            title: Some("Blueming".to_string()),
            artist: None,
            thumbnail: None,
        };
        assert_eq!(meta.summary(), "알 수 없음 - Blueming");
    }
}
