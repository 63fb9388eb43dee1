use thiserror::Error;

/// Gateway error. Every variant carries a message safe to show to the browser.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    // ── Upstream errors ──────────────────────────────────────────────────────
    #[error("{service} service unavailable at {url}")]
    UpstreamUnavailable { service: &'static str, url: String },

    #[error("{service} service did not answer within {seconds}s")]
    UpstreamTimeout { service: &'static str, seconds: u64 },

    #[error("{service} service answered with status {status}")]
    UpstreamStatus { service: &'static str, status: u16 },

    #[error("{service} service returned an unreadable response: {message}")]
    UpstreamDecode { service: &'static str, message: String },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn empty_field(field_name: impl Into<String>) -> Self {
        AppError::EmptyField { field_name: field_name.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyField { .. } | AppError::FieldTooLong { .. } | AppError::InvalidBody { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::UpstreamTimeout { .. })
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamUnavailable { .. }
                | AppError::UpstreamStatus { .. }
                | AppError::UpstreamDecode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(AppError::empty_field("message").is_validation());
        assert!(AppError::UpstreamTimeout { service: "MCP", seconds: 25 }.is_timeout());
        assert!(AppError::UpstreamStatus { service: "ERP", status: 500 }.is_upstream());
        assert!(!AppError::Unexpected("boom".into()).is_upstream());
    }

    #[test]
    fn messages() {
        let err = AppError::FieldTooLong {
            field_name: "message".into(),
            max_length: 5000,
            actual_length: 5001,
        };
        assert_eq!(
            err.to_string(),
            "Field 'message' exceeds max length of 5000 (actual: 5001)"
        );
        assert_eq!(
            AppError::UpstreamTimeout { service: "MCP", seconds: 25 }.to_string(),
            "MCP service did not answer within 25s"
        );
    }
}
