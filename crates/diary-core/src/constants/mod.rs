// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Remote endpoints, cache namespaces, HTTP defaults, and diary fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat list.

/// Product cache namespaces
pub mod cache;

/// Remote API endpoints (paths relative to the configured base URL)
pub mod endpoints {
    /// Default service base URL
    pub const DEFAULT_BASE_URL: &str = "https://yzapi.yazio.com";
    /// OAuth token endpoint (password and `refresh_token` grants)
    pub const OAUTH_TOKEN: &str = "/v15/oauth/token";
    /// Consumed items for a date; also the add/delete endpoint
    pub const CONSUMED_ITEMS: &str = "/v15/user/consumed-items";
    /// Server-side daily nutrient sums
    pub const NUTRIENTS_DAILY: &str = "/v15/user/consumed-items/nutrients-daily";
    /// Product lookup and search prefix
    pub const PRODUCTS: &str = "/v15/products";
    /// Recipe lookup prefix
    pub const RECIPES: &str = "/v15/recipes";
    /// Per-date goals
    pub const GOALS: &str = "/v15/user/goals";
    /// Authenticated user profile
    pub const PROFILE: &str = "/v15/user";
}

/// HTTP client defaults
pub mod http {
    /// Per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
    /// Connection establishment timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Longest response body kept in error messages
    pub const MAX_ERROR_BODY_CHARS: usize = 512;
}

/// Environment variable names read by the configuration layer
pub mod env_vars {
    /// Override for the service base URL
    pub const BASE_URL: &str = "YAZIO_BASE_URL";
    /// OAuth client ID
    pub const CLIENT_ID: &str = "YAZIO_CLIENT_ID";
    /// OAuth client secret
    pub const CLIENT_SECRET: &str = "YAZIO_CLIENT_SECRET";
    /// Request timeout override in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "YAZIO_HTTP_TIMEOUT_SECS";
    /// Override for the session file location
    pub const SESSION_FILE: &str = "NUTRITION_DIARY_SESSION_FILE";
}

/// Diary behavior defaults
pub mod diary {
    /// Days scanned backwards when collecting recent foods
    pub const RECENT_LOOKBACK_DAYS: u32 = 7;
    /// Maximum number of recent foods returned
    pub const RECENT_LIMIT: usize = 20;
    /// Fallback energy goal when the service reports zero
    pub const FALLBACK_ENERGY_KCAL: f64 = 2000.0;
    /// Fallback protein goal in grams
    pub const FALLBACK_PROTEIN_G: f64 = 150.0;
    /// Fallback carbohydrate goal in grams
    pub const FALLBACK_CARB_G: f64 = 250.0;
    /// Fallback fat goal in grams
    pub const FALLBACK_FAT_G: f64 = 65.0;
    /// Search country when the profile has none
    pub const DEFAULT_SEARCH_COUNTRY: &str = "DE";
    /// Search sex when the profile has none
    pub const DEFAULT_SEARCH_SEX: &str = "male";
    /// Serving label used for gram-denominated records
    pub const GRAM_SERVING: &str = "gram";
    /// Serving label used for recipe portions
    pub const PORTION_SERVING: &str = "portion";
}

/// Service names for structured logging
pub mod service_names {
    /// Service name used in log output
    pub const NUTRITION_DIARY: &str = "nutrition-diary";
    /// Name used in gateway error messages
    pub const REMOTE_SERVICE: &str = "YAZIO API";
}
