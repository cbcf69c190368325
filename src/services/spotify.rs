use crate::models::{ContentType, ParsedUrl};
use crate::services::{encode_query, parse, path_segments, MusicService};

/// Spotify: `/{type}/{id}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spotify;

impl MusicService for Spotify {
    fn name(&self) -> &str {
        "Spotify"
    }

    fn domains(&self) -> Vec<&str> {
        vec!["spotify.com", "open.spotify.com"]
    }

    fn icon(&self) -> &str {
        "🎧"
    }

    fn platform_key(&self) -> &str {
        "spotify"
    }

    fn result_key(&self) -> &str {
        "spotify"
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
        format!("https://open.spotify.com/search/{}", encode_query(query))
    }
}
