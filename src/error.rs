//! Errors raised by the client.
//!
//! Only infrastructure problems are raised. Anything the remote service
//! answers with is returned as an [`Envelope`](crate::Envelope).

use thiserror::Error;

/// Classification of a raised [`SdkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdkErrorCode {
    /// The API key or branch ID was rejected at construction.
    InvalidClient,
    /// The request could not be completed, or the body was not JSON.
    NetworkError,
}

impl SdkErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SdkErrorCode::InvalidClient => "INVALID_CLIENT",
            SdkErrorCode::NetworkError => "NETWORK_ERROR",
        }
    }
}

impl std::fmt::Display for SdkErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum SdkError {
    /// Bad constructor arguments. No request was attempted.
    #[error("{message}")]
    InvalidClient { message: String },

    /// Transport failure after the attempt budget ran out, or an
    /// unparsable response body.
    #[error("Network request failed: {source:#}")]
    Network {
        #[source]
        source: anyhow::Error,
    },
}

impl SdkError {
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
            message: message.into(),
        }
    }

    pub fn network(source: impl Into<anyhow::Error>) -> Self {
        Self::Network {
            source: source.into(),
        }
    }

    pub fn code(&self) -> SdkErrorCode {
        match self {
            SdkError::InvalidClient { .. } => SdkErrorCode::InvalidClient,
            SdkError::Network { .. } => SdkErrorCode::NetworkError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_render_wire_names() {
        assert_eq!(SdkErrorCode::InvalidClient.to_string(), "INVALID_CLIENT");
        assert_eq!(SdkErrorCode::NetworkError.to_string(), "NETWORK_ERROR");
    }

    #[test]
    fn test_invalid_client_display_is_message() {
        let err = SdkError::invalid_client("API key is invalid");
        assert_eq!(err.code(), SdkErrorCode::InvalidClient);
        assert_eq!(err.to_string(), "API key is invalid");
    }

    #[test]
    fn test_network_error_keeps_cause() {
        let err = SdkError::network(anyhow::anyhow!("connection refused"));
        assert_eq!(err.code(), SdkErrorCode::NetworkError);
        assert!(err.to_string().contains("connection refused"));

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection refused");
    }
}
