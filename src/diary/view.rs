// ABOUTME: Display state for the diary date being shown
// ABOUTME: Stale-result rejection, date navigation, meal grouping, and macro progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use crate::models::{DiaryEntry, DiaryResult, DiarySnapshot, GoalsSnapshot, MealTime};
use chrono::NaiveDate;
use tracing::debug;

/// Progress of one macro toward its goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroProgress {
    /// Amount consumed so far
    pub current: f64,
    /// Target (fallback-substituted)
    pub goal: f64,
    /// `current / goal` clamped to `0.0..=1.0`, zero when the goal is zero
    pub fraction: f64,
}

impl MacroProgress {
    /// Progress of `current` toward `goal`
    #[must_use]
    pub fn new(current: f64, goal: f64) -> Self {
        let fraction = if goal > 0.0 {
            (current / goal).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            current,
            goal,
            fraction,
        }
    }
}

/// Energy, protein, carbohydrate and fat progress for the shown date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyProgress {
    /// Energy in kcal
    pub energy: MacroProgress,
    /// Protein in grams
    pub protein: MacroProgress,
    /// Carbohydrates in grams
    pub carbs: MacroProgress,
    /// Fat in grams
    pub fat: MacroProgress,
}

/// What the diary screen shows
///
/// Holds the most recent snapshot for the requested date. A reconciliation
/// result for any other date is stale and ignored.
#[derive(Debug)]
pub struct DiaryView {
    date: NaiveDate,
    snapshot: Option<DiarySnapshot>,
    last_error: Option<AppError>,
    loading: bool,
}

impl DiaryView {
    /// Empty view showing `date`
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            snapshot: None,
            last_error: None,
            loading: false,
        }
    }

    /// Date currently requested
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Latest snapshot for the requested date, if one arrived
    #[must_use]
    pub const fn snapshot(&self) -> Option<&DiarySnapshot> {
        self.snapshot.as_ref()
    }

    /// Error of the most recent failed load
    #[must_use]
    pub const fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// Whether a load for the requested date is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Mark a load for `date` as started; a different date drops the old snapshot
    pub fn begin_load(&mut self, date: NaiveDate) {
        if date != self.date {
            self.snapshot = None;
        }
        self.date = date;
        self.loading = true;
    }

    /// Apply a reconciliation result; returns `false` if it was stale
    ///
    /// On success the snapshot is replaced wholesale. On failure the previous
    /// snapshot is kept and the error is recorded.
    pub fn apply(&mut self, result: DiaryResult) -> bool {
        if result.date != self.date {
            debug!(result_date = %result.date, shown = %self.date, "discarding stale diary result");
            return false;
        }
        self.loading = false;
        match result.snapshot {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e),
        }
        true
    }

    /// Move to the previous day and return it
    pub fn previous_day(&mut self) -> Option<NaiveDate> {
        let day = self.date.pred_opt()?;
        self.begin_load(day);
        Some(day)
    }

    /// Move to the next day unless that would pass `today`
    pub fn next_day(&mut self, today: NaiveDate) -> Option<NaiveDate> {
        let day = self.date.succ_opt().filter(|d| *d <= today)?;
        self.begin_load(day);
        Some(day)
    }

    /// Jump back to `today`
    pub fn jump_to(&mut self, today: NaiveDate) -> NaiveDate {
        self.begin_load(today);
        today
    }

    /// Entries of one meal in reconciled order
    pub fn entries_for(&self, meal: MealTime) -> impl Iterator<Item = &DiaryEntry> {
        self.snapshot
            .iter()
            .flat_map(|s| s.entries.iter())
            .filter(move |e| e.meal_time == meal)
    }

    /// Energy of one meal
    #[must_use]
    pub fn meal_kcal(&self, meal: MealTime) -> f64 {
        self.entries_for(meal).map(|e| e.kcal).sum()
    }

    /// Goals with fallbacks substituted for zero targets
    #[must_use]
    pub fn effective_goals(&self) -> GoalsSnapshot {
        self.snapshot
            .as_ref()
            .map(|s| s.goals)
            .unwrap_or_default()
            .with_fallbacks()
    }

    /// Progress bars fed from the server-side totals
    #[must_use]
    pub fn progress(&self) -> Option<DailyProgress> {
        let totals = self.snapshot.as_ref()?.totals;
        let goals = self.effective_goals();
        Some(DailyProgress {
            energy: MacroProgress::new(totals.energy_kcal, goals.energy_kcal),
            protein: MacroProgress::new(totals.protein, goals.protein),
            carbs: MacroProgress::new(totals.carb, goals.carb),
            fat: MacroProgress::new(totals.fat, goals.fat),
        })
    }
}
