// ABOUTME: HTTP client construction with per-request and connect timeouts
// ABOUTME: Every gateway call carries a deadline so a slow service surfaces as an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::environment::GatewayConfig;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// Build the client used for all calls to the remote service
///
/// Falls back to a default client if the TLS backend cannot be initialized
/// with the requested settings.
#[must_use]
pub fn build_client(config: &GatewayConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(concat!("nutrition-diary/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        })
}
