// ABOUTME: Gateway configuration loaded from environment variables
// ABOUTME: Base URL, OAuth client credentials, and HTTP timeouts for the remote service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::endpoints::DEFAULT_BASE_URL;
use crate::constants::env_vars;
use crate::constants::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;

/// Connection settings for the remote nutrition service
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Service base URL without trailing slash
    pub base_url: String,
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            client_id: String::new(),
            client_secret: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables, defaulting what is unset
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the timeout is not a
    /// positive integer
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let base_url = env::var(env_vars::BASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_secs = match env::var(env_vars::HTTP_TIMEOUT_SECS) {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => defaults.timeout_secs,
        };

        let config = Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client_id: env::var(env_vars::CLIENT_ID).unwrap_or_default(),
            client_secret: env::var(env_vars::CLIENT_SECRET).unwrap_or_default(),
            timeout_secs,
            connect_timeout_secs: defaults.connect_timeout_secs.min(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that every request depends on
    ///
    /// # Errors
    ///
    /// Returns a config error for a non-http(s) base URL or a zero timeout
    pub fn validate(&self) -> AppResult<()> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(AppError::config(format!(
                "{} must be an http(s) URL, got '{}'",
                env_vars::BASE_URL,
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                env_vars::HTTP_TIMEOUT_SECS
            )));
        }
        Ok(())
    }

    /// Fill in client credentials the environment left unset
    #[must_use]
    pub fn or_credentials(mut self, client_id: &str, client_secret: &str) -> Self {
        if self.client_id.is_empty() {
            client_id.clone_into(&mut self.client_id);
        }
        if self.client_secret.is_empty() {
            client_secret.clone_into(&mut self.client_secret);
        }
        self
    }

    /// Client credentials for the token endpoint
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when either credential is unset
    pub fn client_credentials(&self) -> AppResult<(&str, &str)> {
        if self.client_id.is_empty() {
            return Err(AppError::config_missing(format!(
                "{} is not set",
                env_vars::CLIENT_ID
            )));
        }
        if self.client_secret.is_empty() {
            return Err(AppError::config_missing(format!(
                "{} is not set",
                env_vars::CLIENT_SECRET
            )));
        }
        Ok((&self.client_id, &self.client_secret))
    }

    /// Absolute URL for an endpoint path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn parse_timeout(raw: &str) -> AppResult<u64> {
    raw.trim().parse::<u64>().map_err(|e| {
        AppError::config(format!(
            "{} must be a whole number of seconds: {e}",
            env_vars::HTTP_TIMEOUT_SECS
        ))
    })
}
