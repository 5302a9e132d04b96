//! BIS client error types.

/// Errors from talking to the BIS API (or its mock).
#[derive(Debug, thiserror::Error)]
pub enum BisError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service key rejected
    #[error("unauthorized: check BIS_STATION_KEY and BIS_ARRIVAL_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not well-formed XML
    #[error("XML parse error: {message}")]
    Xml { message: String },

    /// Missing key, unreadable mock data, and similar setup problems
    #[error("not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BisError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = BisError::Xml {
            message: "unexpected end of file".into(),
        };
        assert_eq!(err.to_string(), "XML parse error: unexpected end of file");

        let err = BisError::NotConfigured("no arrivals for stop 9".into());
        assert_eq!(err.to_string(), "not configured: no arrivals for stop 9");

        assert!(BisError::Unauthorized.to_string().contains("BIS_STATION_KEY"));
    }
}
