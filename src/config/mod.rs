// ABOUTME: Configuration management for the nutrition diary client
// ABOUTME: Gateway settings from the environment and the persisted login session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **environment**: remote service URL, client credentials, and timeouts
//! - **session**: the on-disk login session

/// Gateway configuration from environment variables
pub mod environment;
/// Session file persistence
pub mod session;

pub use environment::GatewayConfig;
pub use session::{SessionStore, StoredSession};
