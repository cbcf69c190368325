use crate::models::{ContentType, ParsedUrl};
use crate::services::{encode_query, parse, path_segments, MusicService};

/// Deezer: `/{type}/{id}` with an optional leading two-letter locale
/// (`/en/track/123`, `/FR/album/9`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Deezer;

fn is_locale(segment: &str) -> bool {
    segment.chars().count() == 2
}

impl MusicService for Deezer {
    fn name(&self) -> &str {
        "Deezer"
    }

    fn domains(&self) -> Vec<&str> {
        vec!["deezer.com", "www.deezer.com"]
    }

    fn icon(&self) -> &str {
        "🔥"
    }

    fn platform_key(&self) -> &str {
        "deezer"
    }

    fn result_key(&self) -> &str {
        "deezer"
    }

    fn parse_url(&self, url: &str) -> ParsedUrl {
        let Some(parsed) = parse(url) else {
            return ParsedUrl::unknown(self.name());
        };
        let segments = path_segments(&parsed);

        let type_index = match segments.first() {
            Some(first) if is_locale(first) => 1,
            _ => 0,
        };

        ParsedUrl {
            service: self.name().to_string(),
            content_type: segments
                .get(type_index)
                .map_or(ContentType::Unknown, |s| ContentType::from_segment(s)),
            id: segments
                .get(type_index + 1)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            region: None,
        }
    }

    fn generate_search_url(&self, query: &str) -> String {
        format!("https://www.deezer.com/search/{}", encode_query(query))
    }
}
