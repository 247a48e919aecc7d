// ABOUTME: Logging configuration and structured logging setup for the diary client
// ABOUTME: tracing-subscriber with env filter, noise reduction, and json/pretty/compact output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging
//!
//! Logs go to stderr; stdout belongs to the diary output.

use crate::constants::service_names;
use anyhow::{anyhow, Result};
use std::env;
use std::io;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines
    Json,
    /// Multi-line human-readable output
    Pretty,
    /// Single-line output
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value; anything unknown is compact
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            include_location: false,
            include_thread: false,
            service_name: service_names::NUTRITION_DIARY.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT").map_or(defaults.format, |v| LogFormat::parse(&v)),
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: env::var("LOG_INCLUDE_THREAD").is_ok(),
            ..defaults
        }
    }

    /// Directives layered over the base filter
    ///
    /// The crate directives only apply when `level` is a bare level name; a
    /// directive list such as `foo=debug,bar=info` is used as given.
    fn extra_directives(&self) -> Vec<String> {
        let mut directives: Vec<String> =
            ["hyper=warn", "hyper_util=warn", "reqwest=warn", "rustls=warn"]
                .into_iter()
                .map(str::to_owned)
                .collect();
        let level = self.level.trim();
        if level.parse::<LevelFilter>().is_ok() {
            directives.push(format!("nutrition_diary={level}"));
            directives.push(format!("diary_core={level}"));
        }
        directives
    }

    /// Filter with noise reduction for the HTTP stack applied on top of the level
    fn env_filter(&self) -> EnvFilter {
        self.extra_directives()
            .iter()
            .filter_map(|d| d.parse().ok())
            .fold(EnvFilter::new(&self.level), EnvFilter::add_directive)
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let base = fmt::layer()
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_thread_ids(self.include_thread)
            .with_thread_names(self.include_thread)
            .with_writer(io::stderr);

        let installed = match self.format {
            LogFormat::Json => registry.with(base.json()).try_init(),
            LogFormat::Pretty => registry.with(base.pretty()).try_init(),
            LogFormat::Compact => registry.with(base.compact().with_target(false)).try_init(),
        };
        installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

        debug!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            log.level = %self.level,
            log.format = ?self.format,
            "logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_directives_follow_bare_level() {
        let config = LoggingConfig {
            level: "debug".to_owned(),
            ..LoggingConfig::default()
        };
        let directives = config.extra_directives();
        assert!(directives.contains(&"nutrition_diary=debug".to_owned()));
        assert!(directives.contains(&"diary_core=debug".to_owned()));
    }

    #[test]
    fn test_directive_list_is_left_alone() {
        let config = LoggingConfig {
            level: "foo=debug,bar=info".to_owned(),
            ..LoggingConfig::default()
        };
        let directives = config.extra_directives();
        assert!(directives.iter().all(|d| !d.starts_with("nutrition_diary")));
        assert!(directives
            .iter()
            .all(|d| d.parse::<tracing_subscriber::filter::Directive>().is_ok()));
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("whatever"), LogFormat::Compact);
    }

    #[test]
    fn test_default_is_quiet_compact() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.service_name, "nutrition-diary");
    }
}
