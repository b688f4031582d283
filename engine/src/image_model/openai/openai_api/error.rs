use thiserror::Error;

/// Errors returned by the OpenAI images API
#[derive(Debug, Error)]
pub enum OpenAiApiError {
    #[error("Invalid request (400): {message}")]
    InvalidRequest { message: String },

    #[error("Authentication error (401): {message}")]
    Authentication { message: String },

    #[error("Permission error (403): {message}")]
    Permission { message: String },

    #[error("Not found (404): {message}")]
    NotFound { message: String },

    #[error("Rate limit exceeded (429): {message}")]
    RateLimit { message: String },

    #[error("Internal API error (500): {message}")]
    Api { message: String },

    #[error("API overloaded (503): {message}")]
    Overloaded { message: String },

    /// Catch-all for unexpected status codes
    #[error("Unexpected API error: {message}")]
    Unexpected { error_type: String, message: String },
}

impl OpenAiApiError {
    pub fn from_type(error_type: &str, message: impl Into<String>) -> Self {
        let message = message.into();

        match error_type {
            "invalid_request_error" => Self::InvalidRequest { message },
            "authentication_error" | "invalid_api_key" => Self::Authentication { message },
            "permission_error" => Self::Permission { message },
            "not_found_error" => Self::NotFound { message },
            "rate_limit_error" | "rate_limit_exceeded" | "insufficient_quota" => {
                Self::RateLimit { message }
            }
            "api_error" => Self::Api { message },
            "overloaded_error" | "server_error" => Self::Overloaded { message },
            other => Self::Unexpected {
                error_type: other.to_string(),
                message,
            },
        }
    }
}
