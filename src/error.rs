//! Errors surfaced by a translation.
//!
//! URL recognition never fails: unparseable or unsupported URLs come back as
//! `Unknown` / `None` from the services and the registry. Only the call to the
//! link-resolution API can fail, and every failure carries a [`FailureKind`]
//! so callers can tell "service unavailable" from a broken response.

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Classification tag attached to every [`TranslateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The resolution service could not be reached or answered with an error.
    Upstream,
    /// The service answered, but not in the expected shape.
    MalformedResponse,
    /// The request could not be built from the caller's input.
    InvalidInput,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Non-success HTTP status from the resolution API
    #[error("링크 변환 서비스 오류 (HTTP {status}){}", .message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// Connection, timeout or TLS failure
    #[error("링크 변환 서비스에 연결할 수 없습니다: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body is not JSON
    #[error("링크 변환 서비스 응답을 읽을 수 없습니다: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// JSON that violates the response contract
    #[error("링크 변환 서비스 응답 형식이 올바르지 않습니다: {0}")]
    MalformedResponse(String),

    #[error("잘못된 URL: {0}")]
    InvalidUrl(String),
}

impl TranslateError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Status { .. } | Self::Network(_) | Self::InvalidBody(_) => FailureKind::Upstream,
            Self::MalformedResponse(_) => FailureKind::MalformedResponse,
            Self::InvalidUrl(_) => FailureKind::InvalidInput,
        }
    }

    /// True when the resolution service itself is unavailable or failing.
    pub fn is_upstream(&self) -> bool {
        self.kind() == FailureKind::Upstream
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = TranslateError::Status {
            status: 429,
            message: Some("rate limited".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limited"));

        let bare = TranslateError::Status {
            status: 500,
            message: None,
        };
        assert!(bare.to_string().ends_with("(HTTP 500)"));
    }

    #[test]
    fn test_classification() {
        let status = TranslateError::Status {
            status: 503,
            message: None,
        };
        assert!(status.is_upstream());

        let body = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(TranslateError::InvalidBody(body).is_upstream());

        let malformed = TranslateError::malformed("missing field `linksByPlatform`");
        assert_eq!(malformed.kind(), FailureKind::MalformedResponse);
        assert!(!malformed.is_upstream());

        let input = TranslateError::InvalidUrl(String::new());
        assert_eq!(input.kind(), FailureKind::InvalidInput);
    }
}
