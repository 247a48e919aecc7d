// ABOUTME: Product cache abstraction shared by every reconciliation in a session
// ABOUTME: Namespaced cache keys and hit/miss statistics for the in-memory product store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory write-once product cache
pub mod memory;

pub use memory::ProductCache;

use crate::constants::cache::{PRODUCT_KEY_PREFIX, RECIPE_KEY_PREFIX};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache key for a resolved definition
///
/// Products and recipes live in separate namespaces, so a product and a
/// recipe that share a raw ID never alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheKey {
    /// Product or simple product by raw ID
    Product(String),
    /// Recipe by raw ID
    Recipe(String),
}

impl CacheKey {
    /// Key for a product ID
    #[must_use]
    pub fn product(id: impl Into<String>) -> Self {
        Self::Product(id.into())
    }

    /// Key for a recipe ID
    #[must_use]
    pub fn recipe(id: impl Into<String>) -> Self {
        Self::Recipe(id.into())
    }

    /// Raw identifier without the namespace
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Product(id) | Self::Recipe(id) => id,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(id) => write!(f, "{PRODUCT_KEY_PREFIX}{id}"),
            Self::Recipe(id) => write!(f, "{RECIPE_KEY_PREFIX}{id}"),
        }
    }
}

/// Point-in-time cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of stored definitions
    pub entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that went to the network
    pub misses: u64,
    /// Fetches that failed and were not stored
    pub fetch_failures: u64,
}

impl CacheStats {
    /// Fraction of lookups answered without a fetch
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
