//! Error types for the currency converter.

use std::time::Duration;

use exchange_rates::RateTableError;

/// Upstream rate provider failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Rate provider returned HTTP {0}")]
    Status(u16),

    #[error("Rate provider unreachable: {0}")]
    Transport(String),

    #[error("Rate provider sent an invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<RateTableError> for ProviderError {
    fn from(err: RateTableError) -> Self {
        ProviderError::InvalidPayload(err.to_string())
    }
}

/// Cache store failures.
///
/// These never reach callers of the converter; the rate store logs them and
/// carries on without the cache.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    Connection(String),

    #[error("Cache did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Cache command failed: {0}")]
    Command(String),
}

/// Conversion errors (what a caller of the converter has to handle).
///
/// The display strings are the user-facing messages printed by the CLI.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConvertError {
    #[error("Currency API is not available at this time.")]
    ProviderUnavailable(#[from] ProviderError),

    #[error("{0} is not a valid currency code.")]
    UnknownCurrency(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        match err {
            ConvertError::UnknownCurrency(_) => AppError::BadRequest(err.to_string()),
            ConvertError::ProviderUnavailable(_) => AppError::ServiceUnavailable(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        let err = ConvertError::UnknownCurrency("XXX".into());
        assert_eq!(err.to_string(), "XXX is not a valid currency code.");

        let err = ConvertError::from(ProviderError::Status(503));
        assert_eq!(err.to_string(), "Currency API is not available at this time.");
    }

    #[test]
    fn test_app_error_mapping() {
        let err: AppError = ConvertError::UnknownCurrency("XXX".into()).into();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("XXX")));

        let err: AppError = ConvertError::from(ProviderError::Transport("refused".into())).into();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }

    #[test]
    fn test_invalid_table_is_a_payload_error() {
        let err: ProviderError = RateTableError::InvalidRate {
            code: "USD".into(),
            rate: -1.0,
        }
        .into();
        assert!(matches!(err, ProviderError::InvalidPayload(msg) if msg.contains("USD")));
    }
}
