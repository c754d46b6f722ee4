use thiserror::Error;

/// Error taxonomy for the analysis pipeline.
///
/// `NoConnectivity` is deliberately separate from `Network`: it is the only
/// transport failure that triggers the offline cache fallback. Timeouts and
/// every other transport-level failure stay `Network` and surface directly.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("no network connectivity")]
    NoConnectivity,

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response from server")]
    InvalidResponse,

    #[error("server returned status {0}")]
    Server(u16),

    #[error("failed to decode response: {0}")]
    Decoding(String),

    #[error("no text or image provided")]
    InvalidInput,
}

impl CoreError {
    /// Human-readable message for the presentation layer.
    pub fn user_message(&self) -> &'static str {
        match self {
            CoreError::NoConnectivity | CoreError::Network(_) => {
                "Unable to reach the analysis service. Please check your connection."
            }
            CoreError::Server(_) => "The analysis service had a problem. Please try again later.",
            CoreError::InvalidResponse | CoreError::Decoding(_) => {
                "Something went wrong while processing the result."
            }
            CoreError::InvalidUrl(_) => "The analysis service is misconfigured.",
            CoreError::InvalidInput => "Nothing to analyze. Scan a label or enter ingredients.",
        }
    }

    /// True only for the connectivity loss that permits the cache fallback.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, CoreError::NoConnectivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_no_connectivity_counts_as_connectivity_loss() {
        assert!(CoreError::NoConnectivity.is_connectivity());
        assert!(!CoreError::Network("timeout".to_string()).is_connectivity());
        assert!(!CoreError::Server(500).is_connectivity());
        assert!(!CoreError::Decoding("bad json".to_string()).is_connectivity());
    }

    #[test]
    fn user_messages_distinguish_failure_classes() {
        let connection = CoreError::NoConnectivity.user_message();
        let server = CoreError::Server(503).user_message();
        let processing = CoreError::InvalidResponse.user_message();
        assert_ne!(connection, server);
        assert_ne!(server, processing);
        assert_ne!(connection, processing);
    }
}
