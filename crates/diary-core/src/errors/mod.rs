// ABOUTME: Unified error type and error codes shared by gateway, cache and engine
// ABOUTME: AppError carries an ErrorCode, a message and an optional source error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the client returns [`AppResult`]. The
//! [`ErrorCode`] is what callers branch on: a network failure aborts a
//! reconciliation, an expired session sends the user back to login, and a
//! mutation inconsistency warns that an edited entry was lost.

/// Gateway-level error taxonomy and its conversion into `AppError`
pub mod gateway;

pub use gateway::GatewayError;

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No stored credentials; the user must log in
    AuthRequired,
    /// The access token was rejected and could not be refreshed
    AuthExpired,
    /// Caller supplied invalid input
    InvalidInput,
    /// Requested resource does not exist
    ResourceNotFound,
    /// Remote service answered with a non-success status
    ExternalServiceError,
    /// Remote service could not be reached (transport failure or timeout)
    ExternalServiceUnavailable,
    /// An edit deleted the old entry but failed to create the replacement
    MutationInconsistent,
    /// Configuration is invalid
    ConfigError,
    /// Required configuration is missing
    ConfigMissing,
    /// Local storage (session file) failed
    StorageError,
    /// Payload could not be serialized or deserialized
    SerializationError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required",
            Self::AuthExpired => "Session expired, please log in again",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "The nutrition service returned an error",
            Self::ExternalServiceUnavailable => "The nutrition service could not be reached",
            Self::MutationInconsistent => {
                "The diary entry was removed but its replacement could not be saved"
            }
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::StorageError => "Local storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Transport-level failure reaching the remote service
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceUnavailable, message)
    }

    /// Authentication failed and the session cannot be recovered
    #[must_use]
    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthExpired, message)
    }

    /// No credentials available
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(ErrorCode::AuthRequired, "Not logged in")
    }

    /// Edit sequence deleted the old entry but the replacement add failed
    #[must_use]
    pub fn mutation_inconsistent(consumed_id: &str, cause: &Self) -> Self {
        Self::new(
            ErrorCode::MutationInconsistent,
            format!("entry {consumed_id} was deleted but re-adding it failed: {cause}"),
        )
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Required configuration value is missing
    #[must_use]
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Local storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Whether the session must be re-established by logging in
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self.code, ErrorCode::AuthExpired | ErrorCode::AuthRequired)
    }

    /// Whether the remote service could not be reached
    #[must_use]
    pub fn is_network(&self) -> bool {
        self.code == ErrorCode::ExternalServiceUnavailable
    }

    /// Whether an edit left the diary without the edited entry
    #[must_use]
    pub fn is_mutation_inconsistent(&self) -> bool {
        self.code == ErrorCode::MutationInconsistent
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
