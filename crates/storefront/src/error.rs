//! Unified error handling with Sentry integration.
//!
//! Every storefront failure falls into one of three kinds: the shopper did
//! something the client can reject locally, the backend could not be reached
//! (or answered with garbage), or the backend answered `success: false`.
//! Raw API calls return `Result<T, StoreError>`; the [`Session`] turns errors
//! into notifications.
//!
//! [`Session`]: crate::session::Session

use shopfront_core::{AddressError, CartError, SizeError};
use thiserror::Error;

/// Message shown for transport failures. Details go to the log, not the shopper.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Storefront error type.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected locally before any network call.
    #[error("{0}")]
    Validation(String),

    /// Transport failure: connection, timeout, non-2xx status or undecodable body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend reported `success: false`.
    #[error("{0}")]
    Server(String),
}

/// Discriminant of [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Network,
    Server,
}

impl StoreError {
    /// Build a server error, falling back to a generic message when the
    /// backend did not provide one.
    #[must_use]
    pub fn server(message: Option<String>) -> Self {
        Self::Server(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        )
    }

    /// The error's kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Network(_) => ErrorKind::Network,
            Self::Server(_) => ErrorKind::Server,
        }
    }

    /// Text suitable for a shopper-facing notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Server(message) => message.clone(),
            Self::Network(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// Log the error and, for transport failures, capture it to Sentry.
    pub fn report(&self, operation: &str) {
        match self {
            Self::Network(err) => {
                let event_id = sentry::capture_error(err);
                tracing::error!(
                    operation,
                    error = %err,
                    sentry_event_id = %event_id,
                    "Backend request failed"
                );
            }
            Self::Server(message) => {
                tracing::warn!(operation, message = %message, "Backend rejected request");
            }
            Self::Validation(message) => {
                tracing::info!(operation, message = %message, "Request rejected locally");
            }
        }
    }
}

impl From<SizeError> for StoreError {
    fn from(err: SizeError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CartError> for StoreError {
    fn from(err: CartError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<AddressError> for StoreError {
    fn from(err: AddressError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            StoreError::Validation("x".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(StoreError::server(None).kind(), ErrorKind::Server);
    }

    #[test]
    fn test_server_message_fallback() {
        assert_eq!(StoreError::server(None).user_message(), GENERIC_FAILURE);
        assert_eq!(
            StoreError::server(Some("  ".into())).user_message(),
            GENERIC_FAILURE
        );
        assert_eq!(
            StoreError::server(Some("Order not found".into())).user_message(),
            "Order not found"
        );
    }

    #[test]
    fn test_validation_conversions() {
        let err = StoreError::from(SizeError);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Select Product Size");

        let err = StoreError::from(AddressError::Missing("city"));
        assert_eq!(err.user_message(), "address field `city` is required");
    }
}
