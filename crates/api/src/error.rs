/// Errors raised by calls to the backend REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    ///
    /// `message` carries the backend's own error text when the body had one.
    #[error("Backend returned HTTP {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// A 2xx response body did not decode as the expected envelope.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The backend's own error message when it sent one, else `fallback`.
    ///
    /// This is what user-facing surfaces toast: the authority's text verbatim
    /// when available, a generic per-operation message otherwise.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message,
            _ => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_backend_message() {
        let err = ApiError::Status {
            status: 401,
            message: Some("Invalid credentials".into()),
        };
        assert_eq!(
            err.to_string(),
            "Backend returned HTTP 401: Invalid credentials"
        );
    }

    #[test]
    fn status_display_without_message() {
        let err = ApiError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "Backend returned HTTP 502: no message");
    }

    #[test]
    fn message_or_prefers_backend_text() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Roll number already exists".into()),
        };
        assert_eq!(err.message_or("Login Failed"), "Roll number already exists");
    }

    #[test]
    fn message_or_falls_back_for_other_variants() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.message_or("Login Failed"), "Login Failed");

        let decode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert_eq!(ApiError::Decode(decode).message_or("fallback"), "fallback");
    }
}
