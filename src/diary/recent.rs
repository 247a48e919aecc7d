// ABOUTME: Recent-foods aggregation for quick re-logging
// ABOUTME: Walks back over recent days, dedups product IDs, and resolves through the cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::DiaryEngine;
use crate::constants::diary::{RECENT_LIMIT, RECENT_LOOKBACK_DAYS};
use crate::errors::AppResult;
use crate::models::ProductDefinition;
use chrono::{Days, NaiveDate};
use futures_util::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

impl DiaryEngine {
    /// Distinct products logged in the last week, most recent day first
    ///
    /// # Errors
    ///
    /// Returns an error only when the session has expired
    pub async fn recent_foods(&self, date: NaiveDate) -> AppResult<Vec<Arc<ProductDefinition>>> {
        self.recent_foods_with(date, RECENT_LOOKBACK_DAYS, RECENT_LIMIT)
            .await
    }

    /// Distinct products logged on `date` and the `lookback_days - 1` days before it
    ///
    /// The first occurrence of a product ID wins; IDs whose definition cannot
    /// be resolved are skipped. Days whose fetch fails are skipped too, but an
    /// expired session aborts the walk.
    ///
    /// # Errors
    ///
    /// Returns the session-expired error from the gateway
    #[instrument(skip(self))]
    pub async fn recent_foods_with(
        &self,
        date: NaiveDate,
        lookback_days: u32,
        limit: usize,
    ) -> AppResult<Vec<Arc<ProductDefinition>>> {
        let mut seen = HashSet::new();
        let mut foods = Vec::new();

        for offset in 0..lookback_days {
            if foods.len() >= limit {
                break;
            }
            let Some(day) = date.checked_sub_days(Days::new(u64::from(offset))) else {
                break;
            };

            let payload = match self.gateway.fetch_consumed_items(day).await {
                Ok(payload) => payload,
                Err(e) if e.is_session_expired() => return Err(e),
                Err(e) => {
                    warn!(day = %day, error = %e, "skipping day in recent foods");
                    continue;
                }
            };

            let fresh: Vec<String> = payload
                .into_records()
                .iter()
                .filter_map(|record| record.as_product())
                .map(|portion| portion.product_id.clone())
                .filter(|id| seen.insert(id.clone()))
                .collect();

            let resolved = join_all(fresh.iter().map(|id| self.product(id))).await;
            for definition in resolved.into_iter().flatten() {
                if foods.len() >= limit {
                    break;
                }
                foods.push(definition);
            }
            debug!(day = %day, collected = foods.len(), "recent foods progress");
        }

        Ok(foods)
    }
}
