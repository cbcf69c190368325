use crate::models::{ContentType, ParsedUrl};
use crate::services::{encode_query, parse, query_param, MusicService};

const SHORT_LINK_HOST: &str = "youtu.be";

/// YouTube: `watch?v={id}`, or `youtu.be/{id}` short links.
/// Every well-formed YouTube URL is treated as a track.
#[derive(Debug, Clone, Copy, Default)]
pub struct YouTube;

impl MusicService for YouTube {
    fn name(&self) -> &str {
        "YouTube"
    }

    fn domains(&self) -> Vec<&str> {
        vec!["youtube.com", SHORT_LINK_HOST]
    }

    fn icon(&self) -> &str {
        "📹"
    }

    fn platform_key(&self) -> &str {
        "youtube"
    }

    fn result_key(&self) -> &str {
        "youtube"
    }

    fn parse_url(&self, url: &str) -> ParsedUrl {
        let Some(parsed) = parse(url) else {
            return ParsedUrl::unknown(self.name());
        };

        let is_short_link = parsed
            .host_str()
            .is_some_and(|host| host.contains(SHORT_LINK_HOST));
        let id = if is_short_link {
            parsed.path().strip_prefix('/').unwrap_or_default().to_string()
        } else {
            query_param(&parsed, "v").unwrap_or_default()
        };

        ParsedUrl {
            service: self.name().to_string(),
            content_type: ContentType::Track,
            id,
            region: None,
        }
    }

    fn generate_search_url(&self, query: &str) -> String {
        format!(
            "https://www.youtube.com/results?search_query={}",
            encode_query(query)
        )
    }
}
