use crate::models::{ContentType, ParsedUrl};
use crate::services::{encode_query, parse, path_segments, MusicService};

/// Tidal: `/{type}/{id}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tidal;

impl MusicService for Tidal {
    fn name(&self) -> &str {
        "Tidal"
    }

    fn domains(&self) -> Vec<&str> {
        vec!["tidal.com"]
    }

    fn icon(&self) -> &str {
        "🌊"
    }

    fn platform_key(&self) -> &str {
        "tidal"
    }

    fn result_key(&self) -> &str {
        "tidal"
    }

    fn parse_url(&self, url: &str) -> ParsedUrl {
        let Some(parsed) = parse(url) else {
            return ParsedUrl::unknown(self.name());
        };
        let segments = path_segments(&parsed);

        ParsedUrl {
            service: self.name().to_string(),
            content_type: segments
                .first()
                .map_or(ContentType::Unknown, |s| ContentType::from_segment(s)),
            id: segments.get(1).map(|s| s.to_string()).unwrap_or_default(),
            region: None,
        }
    }

    fn generate_search_url(&self, query: &str) -> String {
        format!("https://tidal.com/search?q={}", encode_query(query))
    }
}
