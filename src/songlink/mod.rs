//! Song.link (Odesli) cross-platform link resolution API.
//!
//! The translation core only needs "URL in, raw response out", so the HTTP
//! client sits behind [`LinkResolver`] and tests swap in an in-memory resolver.

pub mod client;
pub mod dto;

pub use client::SongLinkClient;
pub use dto::SongLinkResponse;

use crate::error::Result;

/// 입력 URL을 외부 API로 조회하여 원본 응답을 돌려주는 트레이트.
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, url: &str) -> Result<SongLinkResponse>;
}

impl LinkResolver for SongLinkClient {
    fn resolve(&self, url: &str) -> Result<SongLinkResponse> {
        self.fetch_links(url)
    }
}
