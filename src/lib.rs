//! 스트리밍 서비스 음악 링크를 다른 서비스 링크로 바꿔 주는 라이브러리.
//!
//! - [`services`]: 서비스 디스크립터와 레지스트리 (URL 인식, ID 추출, 검색 URL)
//! - [`songlink`]: song.link API 클라이언트와 응답 형식
//! - [`translator`]: API 응답을 서비스별 링크 목록으로 변환

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod songlink;
pub mod translator;

pub use error::{FailureKind, TranslateError};
pub use models::{ContentType, LinkEntry, LinkMetadata, ParsedUrl, TranslatedLinks};
pub use services::{MusicService, ServiceRegistry};
pub use translator::{translate_response, LinkTranslator};
