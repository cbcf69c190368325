use crate::models::{ContentType, ParsedUrl};
use crate::services::{encode_query, parse, query_param, MusicService};

/// YouTube Music: the path shape picks the content type and the query
/// parameter holding the ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct YouTubeMusic;

impl MusicService for YouTubeMusic {
    fn name(&self) -> &str {
        "YouTube Music"
    }

    fn domains(&self) -> Vec<&str> {
        vec!["music.youtube.com"]
    }

    fn icon(&self) -> &str {
        "📺"
    }

    fn platform_key(&self) -> &str {
        "youtubeMusic"
    }

    fn result_key(&self) -> &str {
        "youtubeMusic"
    }

    fn parse_url(&self, url: &str) -> ParsedUrl {
        let Some(parsed) = parse(url) else {
            return ParsedUrl::unknown(self.name());
        };

        let path = parsed.path();
        let (content_type, param) = if path.contains("/watch") {
            (ContentType::Track, Some("v"))
        } else if path.contains("/playlist") {
            (ContentType::Playlist, Some("list"))
        } else if path.contains("/browse") {
            (ContentType::Album, Some("browse_id"))
        } else {
            (ContentType::Unknown, None)
        };

        ParsedUrl {
            service: self.name().to_string(),
            content_type,
            id: param
                .and_then(|key| query_param(&parsed, key))
                .unwrap_or_default(),
            region: None,
        }
    }

    fn generate_search_url(&self, query: &str) -> String {
        format!("https://music.youtube.com/search?q={}", encode_query(query))
    }
}
