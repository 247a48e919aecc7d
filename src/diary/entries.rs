// ABOUTME: Diary entry derivation from consumed records and resolved definitions
// ABOUTME: Gram and serving-unit conversion, one-decimal rounding, and meal-time ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::diary::{GRAM_SERVING, PORTION_SERVING};
use crate::models::{
    ConsumedRecord, DiaryEntry, NutrientVector, ProductDefinition, ProductPortion, RecipePortion,
};

/// Serving labels that mean the amount is already in grams (or millilitres)
const GRAM_LABELS: [&str; 3] = [GRAM_SERVING, "g", "ml"];

/// Round to one decimal, half away from zero
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whether a product record is denominated in grams rather than servings
#[must_use]
pub fn is_gram_record(portion: &ProductPortion) -> bool {
    let label = portion.serving.trim();
    label.is_empty()
        || portion.serving_quantity <= 0.0
        || GRAM_LABELS.iter().any(|g| label.eq_ignore_ascii_case(g))
}

/// Total grams a product record stands for
///
/// Gram records use their amount. Serving records multiply the quantity by
/// the matched serving's weight; an unknown serving counts as the implicit
/// one-gram serving.
#[must_use]
pub fn total_grams(portion: &ProductPortion, product: Option<&ProductDefinition>) -> f64 {
    if is_gram_record(portion) {
        return portion.amount;
    }
    match product.and_then(|p| p.serving(portion.serving.trim())) {
        Some(serving) => portion.serving_quantity * serving.size_grams,
        None => portion.serving_quantity,
    }
}

/// Grams for `quantity` of the named serving of `product`, for building new entries
#[must_use]
pub fn grams_for_serving(product: &ProductDefinition, serving: &str, quantity: f64) -> f64 {
    product
        .serving(serving)
        .map_or(quantity, |s| s.size_grams * quantity)
}

struct Macros {
    kcal: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
}

impl Macros {
    const ZERO: Self = Self {
        kcal: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
    };

    fn scaled(nutrients: &NutrientVector, factor: f64) -> Self {
        Self {
            kcal: round1(nutrients.energy_kcal * factor),
            protein: round1(nutrients.protein * factor),
            carbs: round1(nutrients.carbohydrate * factor),
            fat: round1(nutrients.fat * factor),
        }
    }
}

/// Entry for a product or simple product record
#[must_use]
pub fn product_entry(portion: &ProductPortion, product: Option<&ProductDefinition>) -> DiaryEntry {
    let grams = total_grams(portion, product);
    let (name, macros) = product.map_or_else(
        || (portion.product_id.clone(), Macros::ZERO),
        |p| (p.name.clone(), Macros::scaled(&p.nutrients, grams)),
    );
    DiaryEntry {
        consumed_id: portion.id.clone(),
        item_id: portion.product_id.clone(),
        name,
        meal_time: portion.meal_time,
        amount: grams,
        serving: portion.serving.clone(),
        serving_quantity: portion.serving_quantity,
        kcal: macros.kcal,
        protein: macros.protein,
        carbs: macros.carbs,
        fat: macros.fat,
    }
}

/// Entry for a recipe record; recipe nutrients are per portion
#[must_use]
pub fn recipe_entry(portion: &RecipePortion, recipe: Option<&ProductDefinition>) -> DiaryEntry {
    let (name, macros) = recipe.map_or_else(
        || (portion.recipe_id.clone(), Macros::ZERO),
        |r| (r.name.clone(), Macros::scaled(&r.nutrients, portion.portion_count)),
    );
    DiaryEntry {
        consumed_id: portion.id.clone(),
        item_id: portion.recipe_id.clone(),
        name,
        meal_time: portion.meal_time,
        amount: portion.portion_count,
        serving: PORTION_SERVING.to_owned(),
        serving_quantity: portion.portion_count,
        kcal: macros.kcal,
        protein: macros.protein,
        carbs: macros.carbs,
        fat: macros.fat,
    }
}

/// Entry for any record; `definition` is `None` when resolution failed
#[must_use]
pub fn build_entry(record: &ConsumedRecord, definition: Option<&ProductDefinition>) -> DiaryEntry {
    match record {
        ConsumedRecord::Product(p) | ConsumedRecord::SimpleProduct(p) => {
            product_entry(p, definition)
        }
        ConsumedRecord::RecipePortion(r) => recipe_entry(r, definition),
    }
}

/// Stable sort into breakfast, lunch, dinner, snack groups
pub fn sort_by_meal_time(entries: &mut [DiaryEntry]) {
    entries.sort_by_key(|e| e.meal_time.order());
}
