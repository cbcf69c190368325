use crate::models::{ContentType, ParsedUrl};
use crate::services::{encode_query, parse, path_segments, MusicService};

/// Apple Music: `/{region}/{type}/{slug}/{id}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleMusic;

impl MusicService for AppleMusic {
    fn name(&self) -> &str {
        "Apple Music"
    }

    fn domains(&self) -> Vec<&str> {
        vec!["music.apple.com"]
    }

    fn icon(&self) -> &str {
        "🎵"
    }

    fn platform_key(&self) -> &str {
        "appleMusic"
    }

    fn result_key(&self) -> &str {
        "apple"
    }

    fn parse_url(&self, url: &str) -> ParsedUrl {
        let Some(parsed) = parse(url) else {
            return ParsedUrl::unknown(self.name());
        };
        let segments = path_segments(&parsed);

        ParsedUrl {
            service: self.name().to_string(),
            content_type: segments
                .get(1)
                .map_or(ContentType::Unknown, |s| ContentType::from_segment(s)),
            id: segments.get(3).map(|s| s.to_string()).unwrap_or_default(),
            region: segments.first().map(|s| s.to_string()),
        }
    }

    fn generate_search_url(&self, query: &str) -> String {
        format!("https://music.apple.com/search?term={}", encode_query(query))
    }
}
