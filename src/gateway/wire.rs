// ABOUTME: JSON wire formats of the remote nutrition service
// ABOUTME: Lenient response DTOs and request bodies with conversion into domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Wire types
//!
//! The service is not consistent about field names, so response DTOs accept
//! the known variants and default everything that may be absent. Conversions
//! into domain models happen here and nowhere else.

use crate::models::{
    ConsumedItemsPayload, DailyTotals, GoalsSnapshot, MealTime, NewConsumedItem, NutrientVector,
    ProductDefinition, ProductPortion, RecipePortion, Serving, UserProfile,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Wire date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date the way the service expects it in query strings and bodies
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse the leading `YYYY-MM-DD` of a wire date, which may carry a time suffix
fn parse_wire_date(raw: &str, fallback: NaiveDate) -> NaiveDate {
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
        .unwrap_or(fallback)
}

fn parse_daytime(raw: &str, consumed_id: &str) -> MealTime {
    MealTime::parse(raw).unwrap_or_else(|| {
        warn!(consumed_id, daytime = raw, "unknown daytime, filing under snack");
        MealTime::Snack
    })
}

/// First non-zero of two alternative wire fields
fn first_non_zero(primary: f64, secondary: f64) -> f64 {
    if primary.abs() > f64::EPSILON {
        primary
    } else {
        secondary
    }
}

// ============================================================================
// Consumed items
// ============================================================================

/// Response of `GET /v15/user/consumed-items?date=`
#[derive(Debug, Default, Deserialize)]
pub struct ConsumedItemsResponse {
    #[serde(default)]
    products: Vec<ConsumedProductDto>,
    #[serde(default)]
    recipe_portions: Vec<ConsumedRecipeDto>,
    #[serde(default)]
    simple_products: Vec<ConsumedProductDto>,
}

#[derive(Debug, Deserialize)]
struct ConsumedProductDto {
    id: String,
    #[serde(default)]
    product_id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    daytime: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    serving: Option<String>,
    #[serde(default)]
    serving_quantity: Option<f64>,
}

impl ConsumedProductDto {
    fn into_portion(self, requested: NaiveDate) -> ProductPortion {
        let meal_time = parse_daytime(&self.daytime, &self.id);
        ProductPortion {
            date: parse_wire_date(&self.date, requested),
            meal_time,
            id: self.id,
            product_id: self.product_id,
            amount: self.amount,
            serving: self.serving.unwrap_or_default(),
            serving_quantity: self.serving_quantity.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConsumedRecipeDto {
    id: String,
    #[serde(default)]
    recipe_id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    daytime: String,
    #[serde(default)]
    portion_count: f64,
}

impl ConsumedRecipeDto {
    fn into_portion(self, requested: NaiveDate) -> RecipePortion {
        let meal_time = parse_daytime(&self.daytime, &self.id);
        RecipePortion {
            date: parse_wire_date(&self.date, requested),
            meal_time,
            id: self.id,
            recipe_id: self.recipe_id,
            portion_count: self.portion_count,
        }
    }
}

impl ConsumedItemsResponse {
    /// Convert into domain records; undated records take the requested date
    #[must_use]
    pub fn into_payload(self, requested: NaiveDate) -> ConsumedItemsPayload {
        ConsumedItemsPayload {
            products: self
                .products
                .into_iter()
                .map(|p| p.into_portion(requested))
                .collect(),
            recipe_portions: self
                .recipe_portions
                .into_iter()
                .map(|r| r.into_portion(requested))
                .collect(),
            simple_products: self
                .simple_products
                .into_iter()
                .map(|p| p.into_portion(requested))
                .collect(),
        }
    }
}

// ============================================================================
// Products, recipes and search
// ============================================================================

/// Nutrient block of a product or recipe
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NutrientsDto {
    energy_kcal: f64,
    energy: f64,
    carbohydrates: f64,
    carb: f64,
    protein: f64,
    fat: f64,
    fiber: f64,
    sugar: f64,
}

impl From<NutrientsDto> for NutrientVector {
    fn from(dto: NutrientsDto) -> Self {
        Self {
            energy_kcal: first_non_zero(dto.energy_kcal, dto.energy),
            carbohydrate: first_non_zero(dto.carbohydrates, dto.carb),
            protein: dto.protein,
            fat: dto.fat,
            fiber: dto.fiber,
            sugar: dto.sugar,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServingDto {
    #[serde(default, alias = "name")]
    serving: String,
    #[serde(default, alias = "size")]
    amount: f64,
}

/// Response of `GET /v15/products/{id}` and `GET /v15/recipes/{id}`
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    product_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    nutrients: NutrientsDto,
    #[serde(default)]
    servings: Vec<ServingDto>,
}

impl ProductResponse {
    /// Convert into a definition identified by `id`
    #[must_use]
    pub fn into_definition(self, id: &str) -> ProductDefinition {
        let servings = self
            .servings
            .into_iter()
            .filter(|s| !s.serving.is_empty() && s.amount > 0.0)
            .map(|s| Serving {
                name: s.serving,
                size_grams: s.amount,
            })
            .collect();
        ProductDefinition::new(id, self.name, self.nutrients.into(), servings)
    }

    /// Convert using the ID carried in the body (search results)
    fn into_search_definition(mut self) -> ProductDefinition {
        let id = self
            .product_id
            .take()
            .or_else(|| self.id.take())
            .unwrap_or_default();
        self.into_definition(&id)
    }
}

/// Response of `GET /v15/products/search`, either a bare list or wrapped
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    /// Bare array of products
    List(Vec<ProductResponse>),
    /// Object with a `products` array
    Wrapped {
        /// Matching products
        products: Vec<ProductResponse>,
    },
}

impl SearchResponse {
    /// Matching products in the order the service ranked them
    #[must_use]
    pub fn into_definitions(self) -> Vec<ProductDefinition> {
        let (Self::List(products) | Self::Wrapped { products }) = self;
        products
            .into_iter()
            .map(ProductResponse::into_search_definition)
            .collect()
    }
}

// ============================================================================
// Goals, daily nutrients, profile
// ============================================================================

/// Build goals from the dotted-key map returned by `GET /v15/user/goals`
///
/// Missing or non-numeric keys are zero.
#[must_use]
pub fn goals_from_map(raw: &HashMap<String, Value>) -> GoalsSnapshot {
    let get = |key: &str| raw.get(key).and_then(Value::as_f64).unwrap_or(0.0);
    GoalsSnapshot {
        energy_kcal: get("energy.energy"),
        carb: get("nutrient.carb"),
        protein: get("nutrient.protein"),
        fat: get("nutrient.fat"),
        water: get("water"),
    }
}

/// One element of `GET /v15/user/consumed-items/nutrients-daily`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DailyNutrientDto {
    date: String,
    energy: f64,
    carb: f64,
    protein: f64,
    fat: f64,
}

/// Totals for `date` from the daily-nutrients array; an empty array is all zeros
#[must_use]
pub fn totals_from_daily(entries: Vec<DailyNutrientDto>, date: NaiveDate) -> DailyTotals {
    entries
        .into_iter()
        .next()
        .map_or_else(
            || DailyTotals::zero(date),
            |d| DailyTotals {
                date: parse_wire_date(&d.date, date),
                energy_kcal: d.energy,
                carb: d.carb,
                protein: d.protein,
                fat: d.fat,
            },
        )
}

/// Response of `GET /v15/user`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileResponse {
    uuid: String,
    first_name: String,
    last_name: String,
    email: String,
    country: Option<String>,
    sex: Option<String>,
}

impl From<ProfileResponse> for UserProfile {
    fn from(dto: ProfileResponse) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            uuid: dto.uuid,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            country: non_empty(dto.country),
            sex: non_empty(dto.sex),
        }
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /v15/oauth/token`
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
}

impl<'a> TokenRequest<'a> {
    /// Password grant
    #[must_use]
    pub const fn password(
        client_id: &'a str,
        client_secret: &'a str,
        username: &'a str,
        password: &'a str,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            grant_type: "password",
            username: Some(username),
            password: Some(password),
            refresh_token: None,
        }
    }

    /// Refresh-token grant
    #[must_use]
    pub const fn refresh(
        client_id: &'a str,
        client_secret: &'a str,
        refresh_token: &'a str,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            grant_type: "refresh_token",
            username: None,
            password: None,
            refresh_token: Some(refresh_token),
        }
    }
}

/// Token endpoint response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewProductDto<'a> {
    id: &'a str,
    product_id: &'a str,
    date: String,
    daytime: &'static str,
    amount: f64,
    serving: &'a str,
    serving_quantity: f64,
}

/// Body of `POST /v15/user/consumed-items`
#[derive(Debug, Serialize)]
pub struct AddConsumedEnvelope<'a> {
    products: Vec<NewProductDto<'a>>,
    recipe_portions: Vec<Value>,
    simple_products: Vec<Value>,
}

impl<'a> From<&'a NewConsumedItem> for AddConsumedEnvelope<'a> {
    fn from(item: &'a NewConsumedItem) -> Self {
        Self {
            products: vec![NewProductDto {
                id: &item.id,
                product_id: &item.product_id,
                date: format_date(item.date),
                daytime: item.meal_time.as_str(),
                amount: item.amount,
                serving: &item.serving,
                serving_quantity: item.serving_quantity,
            }],
            recipe_portions: Vec::new(),
            simple_products: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_goals_dotted_keys_and_missing_defaults() {
        let raw: HashMap<String, Value> = serde_json::from_value(json!({
            "energy.energy": 2100.0,
            "nutrient.protein": 140,
            "nutrient.fat": null,
            "water": 2500
        }))
        .unwrap();

        let goals = goals_from_map(&raw);
        assert!((goals.energy_kcal - 2100.0).abs() < f64::EPSILON);
        assert!((goals.protein - 140.0).abs() < f64::EPSILON);
        assert!(goals.carb.abs() < f64::EPSILON);
        assert!(goals.fat.abs() < f64::EPSILON);
        assert!((goals.water - 2500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_daily_nutrients_is_zero_for_date() {
        let totals = totals_from_daily(Vec::new(), day());
        assert_eq!(totals, DailyTotals::zero(day()));
    }

    #[test]
    fn test_search_accepts_both_shapes() {
        let bare: SearchResponse =
            serde_json::from_value(json!([{ "product_id": "a", "name": "Apple" }])).unwrap();
        let wrapped: SearchResponse = serde_json::from_value(
            json!({ "products": [{ "id": "b", "name": "Banana" }] }),
        )
        .unwrap();

        let bare = bare.into_definitions();
        let wrapped = wrapped.into_definitions();
        assert_eq!(bare[0].id, "a");
        assert_eq!(wrapped[0].id, "b");
        assert_eq!(wrapped[0].name, "Banana");
    }

    #[test]
    fn test_nutrient_field_variants() {
        let product: ProductResponse = serde_json::from_value(json!({
            "name": "Rye bread",
            "nutrients": { "energy": 2.1, "carb": 0.4, "carbohydrates": 0.45, "protein": 0.08 },
            "servings": [{ "serving": "slice", "amount": 30 }, { "name": "loaf", "size": 750 }]
        }))
        .unwrap();

        let def = product.into_definition("p1");
        assert!((def.nutrients.energy_kcal - 2.1).abs() < f64::EPSILON);
        assert!((def.nutrients.carbohydrate - 0.45).abs() < f64::EPSILON);
        assert_eq!(def.servings().len(), 2);
        assert_eq!(def.serving("loaf").map(|s| s.size_grams), Some(750.0));
    }

    #[test]
    fn test_consumed_items_parse_dates_and_daytime() {
        let response: ConsumedItemsResponse = serde_json::from_value(json!({
            "products": [{
                "id": "c1", "product_id": "p1", "date": "2025-03-13 08:15:00",
                "daytime": "breakfast", "amount": 120, "serving": "slice", "serving_quantity": 2
            }],
            "recipe_portions": [{
                "id": "c2", "recipe_id": "r1", "daytime": "dinner", "portion_count": 1.5
            }]
        }))
        .unwrap();

        let payload = response.into_payload(day());
        assert_eq!(payload.len(), 2);
        assert_eq!(
            payload.products[0].date,
            NaiveDate::from_ymd_opt(2025, 3, 13).unwrap()
        );
        assert_eq!(payload.products[0].meal_time, MealTime::Breakfast);
        assert_eq!(payload.recipe_portions[0].date, day());
        assert_eq!(payload.recipe_portions[0].meal_time, MealTime::Dinner);
    }

    #[test]
    fn test_add_envelope_shape() {
        let item = NewConsumedItem::new("p1", day(), MealTime::Lunch, 60.0, "slice", 3.0);
        let body = serde_json::to_value(AddConsumedEnvelope::from(&item)).unwrap();

        assert_eq!(body["products"][0]["daytime"], "lunch");
        assert_eq!(body["products"][0]["date"], "2025-03-14");
        assert_eq!(body["products"][0]["id"], item.id.as_str());
        assert_eq!(body["recipe_portions"], json!([]));
        assert_eq!(body["simple_products"], json!([]));
    }

    #[test]
    fn test_profile_blank_country_is_none() {
        let profile: UserProfile = serde_json::from_value::<ProfileResponse>(json!({
            "email": "a@b.c", "country": "", "sex": "female"
        }))
        .unwrap()
        .into();

        assert_eq!(profile.country, None);
        assert_eq!(profile.sex.as_deref(), Some("female"));
    }
}
