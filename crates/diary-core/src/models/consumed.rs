// ABOUTME: Consumed-item records as logged in the remote diary
// ABOUTME: ConsumedRecord sum type over products, recipe portions, and simple products
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::MealTime;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product (or simple product) logged against a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPortion {
    /// Consumed-item ID (server-assigned, or a client UUID on creation)
    pub id: String,
    /// Referenced product ID
    pub product_id: String,
    /// Owning date
    pub date: NaiveDate,
    /// Meal-time slot
    pub meal_time: MealTime,
    /// Amount in grams
    pub amount: f64,
    /// Serving label, empty for gram-denominated records
    pub serving: String,
    /// Number of servings
    pub serving_quantity: f64,
}

/// A recipe logged against a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePortion {
    /// Consumed-item ID
    pub id: String,
    /// Referenced recipe ID
    pub recipe_id: String,
    /// Owning date
    pub date: NaiveDate,
    /// Meal-time slot
    pub meal_time: MealTime,
    /// Number of portions eaten
    pub portion_count: f64,
}

/// One logged diary entry as returned by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsumedRecord {
    /// Product from the food database
    Product(ProductPortion),
    /// Portion of a recipe
    RecipePortion(RecipePortion),
    /// User-defined simple product
    SimpleProduct(ProductPortion),
}

impl ConsumedRecord {
    /// Consumed-item ID
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Product(p) | Self::SimpleProduct(p) => &p.id,
            Self::RecipePortion(r) => &r.id,
        }
    }

    /// Product or recipe ID this record refers to
    #[must_use]
    pub fn item_id(&self) -> &str {
        match self {
            Self::Product(p) | Self::SimpleProduct(p) => &p.product_id,
            Self::RecipePortion(r) => &r.recipe_id,
        }
    }

    /// Owning date
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Product(p) | Self::SimpleProduct(p) => p.date,
            Self::RecipePortion(r) => r.date,
        }
    }

    /// Meal-time slot
    #[must_use]
    pub const fn meal_time(&self) -> MealTime {
        match self {
            Self::Product(p) | Self::SimpleProduct(p) => p.meal_time,
            Self::RecipePortion(r) => r.meal_time,
        }
    }

    /// Whether this record references a recipe rather than a product
    #[must_use]
    pub const fn is_recipe(&self) -> bool {
        matches!(self, Self::RecipePortion(_))
    }

    /// Product portion payload, if this record is a product or simple product
    #[must_use]
    pub const fn as_product(&self) -> Option<&ProductPortion> {
        match self {
            Self::Product(p) | Self::SimpleProduct(p) => Some(p),
            Self::RecipePortion(_) => None,
        }
    }
}

/// All consumed records for one date, grouped by kind as the service returns them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumedItemsPayload {
    /// Product records
    #[serde(default)]
    pub products: Vec<ProductPortion>,
    /// Recipe portion records
    #[serde(default)]
    pub recipe_portions: Vec<RecipePortion>,
    /// Simple product records
    #[serde(default)]
    pub simple_products: Vec<ProductPortion>,
}

impl ConsumedItemsPayload {
    /// Total number of records across all kinds
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len() + self.recipe_portions.len() + self.simple_products.len()
    }

    /// Whether the day has no records at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into tagged records: products, then recipe portions, then simple products
    #[must_use]
    pub fn into_records(self) -> Vec<ConsumedRecord> {
        let mut records = Vec::with_capacity(self.len());
        records.extend(self.products.into_iter().map(ConsumedRecord::Product));
        records.extend(
            self.recipe_portions
                .into_iter()
                .map(ConsumedRecord::RecipePortion),
        );
        records.extend(
            self.simple_products
                .into_iter()
                .map(ConsumedRecord::SimpleProduct),
        );
        records
    }
}

/// A product entry to be created in the diary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewConsumedItem {
    /// Client-assigned consumed-item ID
    pub id: String,
    /// Product being logged
    pub product_id: String,
    /// Target date
    pub date: NaiveDate,
    /// Meal-time slot
    pub meal_time: MealTime,
    /// Total amount in grams
    pub amount: f64,
    /// Serving label, empty for a gram entry
    pub serving: String,
    /// Number of servings
    pub serving_quantity: f64,
}

impl NewConsumedItem {
    /// Build a new entry with a freshly generated client-side ID
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        date: NaiveDate,
        meal_time: MealTime,
        amount: f64,
        serving: impl Into<String>,
        serving_quantity: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.into(),
            date,
            meal_time,
            amount,
            serving: serving.into(),
            serving_quantity,
        }
    }
}
