use thiserror::Error;

/// Fixed message shown to the user for any failed lookup.
pub const GENERIC_FAILURE_MESSAGE: &str = "Error fetching weather data";

/// Everything that can go wrong between a submitted query and a reading.
///
/// Only [`LookupError::Validation`] is surfaced to the user as-is. Every other
/// variant is collapsed into [`GENERIC_FAILURE_MESSAGE`] by the controller and
/// kept around for diagnostics only.
#[derive(Debug, Error)]
pub enum LookupError {
    /// City or country missing; the request is never sent.
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    /// Transport-level failure (DNS, connect, reset, ...).
    #[error("network error: {0}")]
    Network(String),

    /// Provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// Body did not match the expected shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be constructed.
    #[error("failed to set up HTTP client: {0}")]
    ClientSetup(String),
}

impl LookupError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LookupError::Validation { .. })
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout
        } else if err.is_decode() {
            LookupError::MalformedResponse(err.to_string())
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = LookupError::Validation { field: "city" };
        assert_eq!(err.to_string(), "city must not be empty");
        assert!(err.is_validation());
    }

    #[test]
    fn status_error_is_not_validation() {
        let err = LookupError::Status {
            status: 500,
            body: String::new(),
        };
        assert!(!err.is_validation());
        assert!(err.to_string().contains("500"));
    }
}
