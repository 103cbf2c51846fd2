//! Error types for the conversation core.

use std::fmt;

/// Errors returned to the presentation layer when a submission is refused.
///
/// Upstream failures never surface here; they are turned into fixed
/// assistant replies by the controller.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a request is already pending")]
    RequestPending,
}

/// Classification shared by every upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The upstream service could not be reached.
    Network,
    /// The upstream service answered with a non-success status.
    HttpStatus,
    /// The upstream service answered successfully but the payload was unusable.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Network => "network",
            FailureKind::HttpStatus => "http_status",
            FailureKind::MalformedResponse => "malformed_response",
        };
        f.write_str(name)
    }
}

/// Failures of the game-catalog search service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog service unreachable: {0}")]
    Network(String),
    #[error("catalog service returned status {0}")]
    Status(u16),
    #[error("catalog response malformed: {0}")]
    Malformed(String),
}

impl CatalogError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::Network(_) => FailureKind::Network,
            CatalogError::Status(_) => FailureKind::HttpStatus,
            CatalogError::Malformed(_) => FailureKind::MalformedResponse,
        }
    }
}

/// Failures of the generative dialogue service.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("dialogue service unreachable: {0}")]
    Network(String),
    #[error("dialogue service returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("dialogue response malformed: {0}")]
    Malformed(String),
}

impl DialogueError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DialogueError::Network(_) => FailureKind::Network,
            DialogueError::Status { .. } => FailureKind::HttpStatus,
            DialogueError::Malformed(_) => FailureKind::MalformedResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::RequestPending.to_string(),
            "a request is already pending"
        );
    }

    #[test]
    fn test_catalog_error_kinds() {
        assert_eq!(
            CatalogError::Network("refused".into()).kind(),
            FailureKind::Network
        );
        assert_eq!(CatalogError::Status(503).kind(), FailureKind::HttpStatus);
        assert_eq!(
            CatalogError::Malformed("eof".into()).kind(),
            FailureKind::MalformedResponse
        );
    }

    #[test]
    fn test_catalog_status_keeps_code() {
        let err = CatalogError::Status(429);
        assert_eq!(err.to_string(), "catalog service returned status 429");
    }

    #[test]
    fn test_dialogue_error_kinds() {
        let err = DialogueError::Status {
            status: 401,
            message: "invalid api key".into(),
        };
        assert_eq!(err.kind(), FailureKind::HttpStatus);
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));
        assert_eq!(
            DialogueError::Malformed("no choices".into()).kind(),
            FailureKind::MalformedResponse
        );
        assert_eq!(
            DialogueError::Network("timeout".into()).kind(),
            FailureKind::Network
        );
    }

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::Network.to_string(), "network");
        assert_eq!(FailureKind::HttpStatus.to_string(), "http_status");
        assert_eq!(
            FailureKind::MalformedResponse.to_string(),
            "malformed_response"
        );
    }
}
