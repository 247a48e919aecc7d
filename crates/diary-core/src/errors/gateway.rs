// ABOUTME: Structured error types for remote nutrition service operations
// ABOUTME: Distinguishes transport failures, expired sessions, HTTP status and decode errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gateway Error Types
//!
//! `GatewayError` is what the HTTP collaborator produces. The engine never
//! inspects these variants beyond converting them into [`AppError`], so the
//! mapping below is the single place that decides which failures count as
//! network errors and which as session expiry.

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised while talking to the remote nutrition service
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The request never produced a response (connect failure, reset, timeout)
    #[error("request to {endpoint} failed: {details}")]
    Transport {
        /// Endpoint path that was being called
        endpoint: String,
        /// Transport error details
        details: String,
    },

    /// Access token rejected and no refresh was possible
    #[error("session expired: {reason}")]
    SessionExpired {
        /// Why the session could not be renewed
        reason: String,
    },

    /// Service answered with a non-success status
    #[error("HTTP {status} from {endpoint}: {body}")]
    Status {
        /// Endpoint path that was being called
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Response body (possibly truncated)
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("could not decode response from {endpoint}: {details}")]
    Decode {
        /// Endpoint path that was being called
        endpoint: String,
        /// Decoder error details
        details: String,
    },

    /// Token endpoint answered without an access token
    #[error("no access_token in token response")]
    MissingAccessToken,
}

impl GatewayError {
    /// Create a transport error
    #[must_use]
    pub fn transport(endpoint: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            details: details.into(),
        }
    }

    /// Create a session-expired error
    #[must_use]
    pub fn session_expired(reason: impl Into<String>) -> Self {
        Self::SessionExpired {
            reason: reason.into(),
        }
    }

    /// Create a decode error
    #[must_use]
    pub fn decode(endpoint: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            details: details.into(),
        }
    }

    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::ExternalServiceUnavailable,
            Self::SessionExpired { .. } => ErrorCode::AuthExpired,
            Self::Status { status: 404, .. } => ErrorCode::ResourceNotFound,
            Self::Status { .. } | Self::MissingAccessToken => ErrorCode::ExternalServiceError,
            Self::Decode { .. } => ErrorCode::SerializationError,
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(error: GatewayError) -> Self {
        Self::new(error.code(), error.to_string()).with_source(error)
    }
}
