// ABOUTME: Diary reconciliation engine over the remote gateway and shared product cache
// ABOUTME: Concurrent fetch of consumed items, goals and totals with per-record resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Diary Engine
//!
//! `reconcile(date)` issues the three top-level gateway calls concurrently,
//! waits for all of them, then resolves every consumed record through the
//! shared [`ProductCache`] with one concurrent task per record. A failed
//! top-level call aborts the reconciliation; a failed record resolution only
//! degrades that entry (raw ID as name, zero nutrients).
//!
//! The returned [`DiaryResult`] always carries the requested date so callers
//! can drop results that a newer request has superseded.

/// Entry derivation and unit conversion
pub mod entries;
/// Add, edit and delete of consumed items
pub mod mutations;
/// Recent-foods aggregation over the last days
pub mod recent;
/// Display state for the currently shown date
pub mod view;

pub use view::{DailyProgress, DiaryView, MacroProgress};

use crate::cache::{CacheKey, ProductCache};
use crate::constants::diary::{DEFAULT_SEARCH_COUNTRY, DEFAULT_SEARCH_SEX};
use crate::errors::{AppError, AppResult};
use crate::gateway::DiaryGateway;
use crate::models::{
    ConsumedRecord, DiaryEntry, DiaryResult, DiarySnapshot, ProductDefinition, UserProfile,
};
use chrono::NaiveDate;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Reconciles the remote diary into display-ready snapshots
#[derive(Clone)]
pub struct DiaryEngine {
    gateway: Arc<dyn DiaryGateway>,
    cache: Arc<ProductCache>,
}

impl DiaryEngine {
    /// Engine over `gateway` sharing `cache` with every other engine of the session
    #[must_use]
    pub fn new(gateway: Arc<dyn DiaryGateway>, cache: Arc<ProductCache>) -> Self {
        Self { gateway, cache }
    }

    /// Shared product cache
    #[must_use]
    pub const fn cache(&self) -> &Arc<ProductCache> {
        &self.cache
    }

    /// Underlying gateway
    #[must_use]
    pub fn gateway(&self) -> &dyn DiaryGateway {
        self.gateway.as_ref()
    }

    /// Reconcile the diary for `date`
    ///
    /// Never fails as a call: the outcome, including any error, is in the
    /// returned [`DiaryResult`] together with `date`.
    #[instrument(skip(self))]
    pub async fn reconcile(&self, date: NaiveDate) -> DiaryResult {
        let snapshot = self.build_snapshot(date).await;
        match &snapshot {
            Ok(s) => info!(entries = s.entries.len(), "diary reconciled"),
            Err(e) => warn!(error = %e, "diary reconciliation failed"),
        }
        DiaryResult { date, snapshot }
    }

    async fn build_snapshot(&self, date: NaiveDate) -> AppResult<DiarySnapshot> {
        let (consumed, goals, totals) = tokio::try_join!(
            self.gateway.fetch_consumed_items(date),
            self.gateway.fetch_goals(date),
            self.gateway.fetch_daily_nutrients(date),
        )?;

        let records = consumed.into_records();
        debug!(records = records.len(), "resolving consumed records");
        let entries = self.resolve_entries(&records).await;

        Ok(DiarySnapshot {
            entries,
            goals,
            totals,
        })
    }

    /// Resolve every record concurrently into its own slot, then group by meal time
    async fn resolve_entries(&self, records: &[ConsumedRecord]) -> Vec<DiaryEntry> {
        let definitions = join_all(records.iter().map(|r| self.resolve(r))).await;

        let mut entries: Vec<DiaryEntry> = records
            .iter()
            .zip(definitions)
            .map(|(record, definition)| entries::build_entry(record, definition.as_deref()))
            .collect();
        entries::sort_by_meal_time(&mut entries);
        entries
    }

    /// Cached definition for the product or recipe a record refers to
    async fn resolve(&self, record: &ConsumedRecord) -> Option<Arc<ProductDefinition>> {
        let id = record.item_id();
        if record.is_recipe() {
            self.cache
                .get_or_fetch(CacheKey::recipe(id), || self.gateway.fetch_recipe(id))
                .await
        } else {
            self.product(id).await
        }
    }

    /// Cached product definition by ID
    pub async fn product(&self, id: &str) -> Option<Arc<ProductDefinition>> {
        self.cache
            .get_or_fetch(CacheKey::product(id), || self.gateway.fetch_product(id))
            .await
    }

    /// Search the food database using the profile's country and sex
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank query, otherwise any gateway error
    #[instrument(skip(self, profile))]
    pub async fn search_foods(
        &self,
        query: &str,
        profile: Option<&UserProfile>,
    ) -> AppResult<Vec<ProductDefinition>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        let country = profile
            .and_then(|p| p.country.as_deref())
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_SEARCH_COUNTRY);
        let sex = profile
            .and_then(|p| p.sex.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SEARCH_SEX);

        let results = self.gateway.search_products(query, country, sex).await?;
        debug!(results = results.len(), country, sex, "search complete");
        Ok(results)
    }
}
