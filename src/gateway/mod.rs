// ABOUTME: Remote nutrition service port consumed by the diary engine
// ABOUTME: DiaryGateway trait plus the reqwest-backed implementation and its wire types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Diary Gateway
//!
//! The engine only talks to the remote service through [`DiaryGateway`].
//! [`remote::HttpGateway`] is the production implementation; tests supply
//! an in-memory one.

/// Shared HTTP client construction
pub mod http_client;
/// reqwest-backed gateway with bearer auth and token refresh
pub mod remote;
/// JSON wire formats and their conversion into domain models
pub mod wire;

pub use remote::{HttpGateway, TokenPair};

use crate::errors::AppResult;
use crate::models::{
    ConsumedItemsPayload, DailyTotals, GoalsSnapshot, NewConsumedItem, ProductDefinition,
    UserProfile,
};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Operations the diary engine needs from the remote service
///
/// Every call is an independent network round-trip with its own deadline.
#[async_trait]
pub trait DiaryGateway: Send + Sync {
    /// Consumed records logged on `date`
    async fn fetch_consumed_items(&self, date: NaiveDate) -> AppResult<ConsumedItemsPayload>;

    /// Goals in effect on `date`
    async fn fetch_goals(&self, date: NaiveDate) -> AppResult<GoalsSnapshot>;

    /// Server-side nutrient sums for `date`
    async fn fetch_daily_nutrients(&self, date: NaiveDate) -> AppResult<DailyTotals>;

    /// Product definition by ID
    async fn fetch_product(&self, id: &str) -> AppResult<ProductDefinition>;

    /// Recipe definition by ID (nutrients are per portion)
    async fn fetch_recipe(&self, id: &str) -> AppResult<ProductDefinition>;

    /// Create a consumed item
    async fn add_consumed_item(&self, item: &NewConsumedItem) -> AppResult<()>;

    /// Delete a consumed item by consumed-item ID
    async fn delete_consumed_item(&self, consumed_id: &str) -> AppResult<()>;

    /// Search the food database
    async fn search_products(
        &self,
        query: &str,
        country: &str,
        sex: &str,
    ) -> AppResult<Vec<ProductDefinition>>;

    /// Profile of the authenticated user
    async fn fetch_profile(&self) -> AppResult<UserProfile>;
}
