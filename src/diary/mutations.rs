// ABOUTME: Diary mutations: add, edit, and delete consumed items
// ABOUTME: Edit is delete-then-add and reports a distinct error when only the delete landed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::DiaryEngine;
use crate::errors::{AppError, AppResult};
use crate::models::{MealTime, NewConsumedItem};
use chrono::NaiveDate;
use tracing::{error, info, instrument};

impl DiaryEngine {
    /// Log a product and return the client-assigned consumed-item ID
    ///
    /// The caller re-reconciles the date afterwards.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty product ID or a negative amount,
    /// otherwise the gateway error
    #[instrument(skip(self))]
    pub async fn add_entry(
        &self,
        product_id: &str,
        date: NaiveDate,
        meal_time: MealTime,
        total_grams: f64,
        serving_label: &str,
        serving_quantity: f64,
    ) -> AppResult<String> {
        let item = NewConsumedItem::new(
            product_id,
            date,
            meal_time,
            total_grams,
            serving_label,
            serving_quantity,
        );
        self.add_item(&item).await?;
        Ok(item.id)
    }

    /// Log a prepared item
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty product ID or a negative amount,
    /// otherwise the gateway error
    pub async fn add_item(&self, item: &NewConsumedItem) -> AppResult<()> {
        validate(item)?;
        self.gateway.add_consumed_item(item).await?;
        info!(consumed_id = %item.id, product_id = %item.product_id, "entry added");
        Ok(())
    }

    /// Replace an entry: delete `consumed_id`, then add `replacement`
    ///
    /// Not atomic. If the delete fails nothing changed and that error is
    /// returned. If the delete succeeds but the add fails, the old entry is
    /// gone and a `MutationInconsistent` error is returned instead of the
    /// plain add error.
    ///
    /// # Errors
    ///
    /// See above
    #[instrument(skip(self, replacement), fields(replacement_id = %replacement.id))]
    pub async fn edit_entry(
        &self,
        consumed_id: &str,
        replacement: &NewConsumedItem,
    ) -> AppResult<()> {
        validate(replacement)?;
        self.gateway.delete_consumed_item(consumed_id).await?;

        if let Err(e) = self.gateway.add_consumed_item(replacement).await {
            error!(consumed_id, error = %e, "edit removed the entry but re-adding failed");
            return Err(AppError::mutation_inconsistent(consumed_id, &e).with_source(e));
        }
        info!(consumed_id, "entry edited");
        Ok(())
    }

    /// Delete an entry; the caller re-reconciles the date afterwards
    ///
    /// # Errors
    ///
    /// Returns the gateway error
    #[instrument(skip(self))]
    pub async fn delete_entry(&self, consumed_id: &str) -> AppResult<()> {
        if consumed_id.trim().is_empty() {
            return Err(AppError::invalid_input("consumed item ID cannot be empty"));
        }
        self.gateway.delete_consumed_item(consumed_id).await?;
        info!(consumed_id, "entry deleted");
        Ok(())
    }
}

fn validate(item: &NewConsumedItem) -> AppResult<()> {
    if item.product_id.trim().is_empty() {
        return Err(AppError::invalid_input("product ID cannot be empty"));
    }
    if !item.amount.is_finite() || item.amount < 0.0 {
        return Err(AppError::invalid_input(format!(
            "amount must be a non-negative number, got {}",
            item.amount
        )));
    }
    Ok(())
}
