// ABOUTME: In-memory product cache backed by a concurrent map
// ABOUTME: Write-once memoization of product and recipe lookups with no eviction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheKey, CacheStats};
use crate::errors::AppResult;
use crate::models::ProductDefinition;
use dashmap::DashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Process-wide product cache
///
/// A `DashMap` shards its locks per key range, so concurrent lookups for
/// different keys never contend on a global lock. No shard guard is held
/// across the fetch `await`. Two concurrent misses for the same key may both
/// fetch; the first insert wins and both callers receive the stored value.
#[derive(Debug, Default)]
pub struct ProductCache {
    store: DashMap<CacheKey, Arc<ProductDefinition>>,
    hits: AtomicU64,
    misses: AtomicU64,
    fetch_failures: AtomicU64,
}

impl ProductCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored definition for `key`, without fetching
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Arc<ProductDefinition>> {
        self.store.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether `key` has been populated
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.store.contains_key(key)
    }

    /// Number of stored definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether nothing has been stored yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Return the cached definition for `key`, fetching and storing it on a miss
    ///
    /// A failed fetch is logged and yields `None`; nothing is stored, so the
    /// next lookup for the same key fetches again.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: CacheKey,
        fetch: F,
    ) -> Option<Arc<ProductDefinition>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<ProductDefinition>>,
    {
        self.try_get_or_fetch(key, fetch).await.ok()
    }

    /// Like [`get_or_fetch`](Self::get_or_fetch) but hands the fetch error back
    ///
    /// # Errors
    ///
    /// Returns the error produced by `fetch` on a miss
    pub async fn try_get_or_fetch<F, Fut>(
        &self,
        key: CacheKey,
        fetch: F,
    ) -> AppResult<Arc<ProductDefinition>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<ProductDefinition>>,
    {
        if let Some(hit) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "product cache miss");

        match fetch().await {
            Ok(definition) => {
                let stored = self
                    .store
                    .entry(key)
                    .or_insert_with(|| Arc::new(definition))
                    .value()
                    .clone();
                Ok(stored)
            }
            Err(e) => {
                self.fetch_failures.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "product fetch failed, not caching");
                Err(e)
            }
        }
    }

    /// Current counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.store.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
        }
    }
}
