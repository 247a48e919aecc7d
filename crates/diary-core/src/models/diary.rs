// ABOUTME: Reconciled diary view models
// ABOUTME: DiaryEntry, GoalsSnapshot, DailyTotals, DiarySnapshot, and date-tagged DiaryResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::MealTime;
use crate::constants::diary::{
    FALLBACK_CARB_G, FALLBACK_ENERGY_KCAL, FALLBACK_FAT_G, FALLBACK_PROTEIN_G,
};
use crate::errors::AppResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One consumed record joined with its resolved definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Consumed-item ID
    pub consumed_id: String,
    /// Product or recipe ID
    pub item_id: String,
    /// Resolved name, or the raw item ID when resolution failed
    pub name: String,
    /// Meal-time slot
    pub meal_time: MealTime,
    /// Total grams (portions for recipes)
    pub amount: f64,
    /// Serving label
    pub serving: String,
    /// Serving quantity
    pub serving_quantity: f64,
    /// Energy in kcal, one decimal
    pub kcal: f64,
    /// Protein in grams, one decimal
    pub protein: f64,
    /// Carbohydrates in grams, one decimal
    pub carbs: f64,
    /// Fat in grams, one decimal
    pub fat: f64,
}

impl DiaryEntry {
    /// Whether the referenced product could not be resolved
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.name == self.item_id
    }
}

/// Per-date targets as reported by the service; missing keys are zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalsSnapshot {
    /// Energy goal in kcal
    pub energy_kcal: f64,
    /// Carbohydrate goal in grams
    pub carb: f64,
    /// Protein goal in grams
    pub protein: f64,
    /// Fat goal in grams
    pub fat: f64,
    /// Water goal in ml
    pub water: f64,
}

impl GoalsSnapshot {
    /// Replace zero targets with the fallback goals
    #[must_use]
    pub fn with_fallbacks(self) -> Self {
        let or = |value: f64, fallback: f64| {
            if value.abs() < f64::EPSILON {
                fallback
            } else {
                value
            }
        };
        Self {
            energy_kcal: or(self.energy_kcal, FALLBACK_ENERGY_KCAL),
            carb: or(self.carb, FALLBACK_CARB_G),
            protein: or(self.protein, FALLBACK_PROTEIN_G),
            fat: or(self.fat, FALLBACK_FAT_G),
            water: self.water,
        }
    }
}

/// Server-computed nutrient sums for one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    /// Date the sums belong to
    pub date: NaiveDate,
    /// Energy in kcal
    pub energy_kcal: f64,
    /// Carbohydrates in grams
    pub carb: f64,
    /// Protein in grams
    pub protein: f64,
    /// Fat in grams
    pub fat: f64,
}

impl DailyTotals {
    /// All-zero totals for a date with nothing logged
    #[must_use]
    pub const fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            energy_kcal: 0.0,
            carb: 0.0,
            protein: 0.0,
            fat: 0.0,
        }
    }
}

/// Fully reconciled diary for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiarySnapshot {
    /// Entries grouped by meal time (breakfast, lunch, dinner, snack)
    pub entries: Vec<DiaryEntry>,
    /// Goals as reported by the service
    pub goals: GoalsSnapshot,
    /// Server-side totals
    pub totals: DailyTotals,
}

/// Outcome of one reconciliation, tagged with the date it was requested for
#[derive(Debug)]
pub struct DiaryResult {
    /// Date the reconciliation targeted
    pub date: NaiveDate,
    /// Snapshot, or the error that aborted the reconciliation
    pub snapshot: AppResult<DiarySnapshot>,
}

impl DiaryResult {
    /// Whether the reconciliation produced a snapshot
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.snapshot.is_ok()
    }
}
