// ABOUTME: Core data models for the nutrition diary client
// ABOUTME: Re-exports consumed records, product definitions, and reconciled diary types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Raw records come from the remote service (`ConsumedRecord`,
//! `ProductDefinition`, `GoalsSnapshot`, `DailyTotals`); the reconciliation
//! engine joins them into `DiaryEntry` values collected in a `DiarySnapshot`.

mod consumed;
mod diary;
mod meal;
mod product;

pub use consumed::{
    ConsumedItemsPayload, ConsumedRecord, NewConsumedItem, ProductPortion, RecipePortion,
};
pub use diary::{DailyTotals, DiaryEntry, DiaryResult, DiarySnapshot, GoalsSnapshot};
pub use meal::MealTime;
pub use product::{NutrientVector, ProductDefinition, Serving, UserProfile};
