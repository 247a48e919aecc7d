// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory DiaryGateway with failure injection and call counters, plus record builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::too_many_arguments,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `nutrition_diary`
//!
//! [`MockGateway`] keeps a diary per date in memory and can be told to fail
//! individual calls, so engine behavior is tested without a network.

use async_trait::async_trait;
use chrono::NaiveDate;
use nutrition_diary::cache::ProductCache;
use nutrition_diary::diary::DiaryEngine;
use nutrition_diary::errors::{AppError, AppResult, GatewayError};
use nutrition_diary::gateway::DiaryGateway;
use nutrition_diary::models::{
    ConsumedItemsPayload, DailyTotals, GoalsSnapshot, MealTime, NewConsumedItem, NutrientVector,
    ProductDefinition, ProductPortion, RecipePortion, Serving, UserProfile,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Definition with per-gram nutrients
pub fn product(
    id: &str,
    name: &str,
    kcal: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    servings: &[(&str, f64)],
) -> ProductDefinition {
    ProductDefinition::new(
        id,
        name,
        NutrientVector {
            energy_kcal: kcal,
            carbohydrate: carbs,
            protein,
            fat,
            ..NutrientVector::default()
        },
        servings
            .iter()
            .map(|(name, size)| Serving {
                name: (*name).to_owned(),
                size_grams: *size,
            })
            .collect(),
    )
}

pub fn portion(
    id: &str,
    product_id: &str,
    date: NaiveDate,
    meal_time: MealTime,
    amount: f64,
    serving: &str,
    serving_quantity: f64,
) -> ProductPortion {
    ProductPortion {
        id: id.to_owned(),
        product_id: product_id.to_owned(),
        date,
        meal_time,
        amount,
        serving: serving.to_owned(),
        serving_quantity,
    }
}

/// Plain gram record
pub fn grams(id: &str, product_id: &str, date: NaiveDate, meal: MealTime, g: f64) -> ProductPortion {
    portion(id, product_id, date, meal, g, "gram", g)
}

pub fn recipe_portion(
    id: &str,
    recipe_id: &str,
    date: NaiveDate,
    meal_time: MealTime,
    portion_count: f64,
) -> RecipePortion {
    RecipePortion {
        id: id.to_owned(),
        recipe_id: recipe_id.to_owned(),
        date,
        meal_time,
        portion_count,
    }
}

/// In-memory gateway
#[derive(Default)]
pub struct MockGateway {
    days: Mutex<HashMap<NaiveDate, ConsumedItemsPayload>>,
    products: HashMap<String, ProductDefinition>,
    recipes: HashMap<String, ProductDefinition>,
    goals: GoalsSnapshot,
    search_results: Vec<ProductDefinition>,
    profile: Option<UserProfile>,
    failing_days: HashSet<NaiveDate>,
    expired_days: HashSet<NaiveDate>,
    fail_goals: bool,
    fail_add: bool,
    fail_delete: bool,
    product_delay: Option<Duration>,
    day_delay: Option<Duration>,

    pub consumed_calls: AtomicUsize,
    pub product_calls: AtomicUsize,
    pub recipe_calls: AtomicUsize,
    pub added: Mutex<Vec<NewConsumedItem>>,
    pub deleted: Mutex<Vec<String>>,
    pub last_search: Mutex<Option<(String, String, String)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: ProductDefinition) -> Self {
        self.products.insert(product.id.clone(), product);
        self
    }

    pub fn with_recipe(mut self, recipe: ProductDefinition) -> Self {
        self.recipes.insert(recipe.id.clone(), recipe);
        self
    }

    pub fn with_goals(mut self, goals: GoalsSnapshot) -> Self {
        self.goals = goals;
        self
    }

    pub fn with_products_on(self, date: NaiveDate, portions: Vec<ProductPortion>) -> Self {
        self.edit_day(date, |day| day.products.extend(portions));
        self
    }

    pub fn with_simple_products_on(self, date: NaiveDate, portions: Vec<ProductPortion>) -> Self {
        self.edit_day(date, |day| day.simple_products.extend(portions));
        self
    }

    pub fn with_recipes_on(self, date: NaiveDate, portions: Vec<RecipePortion>) -> Self {
        self.edit_day(date, |day| day.recipe_portions.extend(portions));
        self
    }

    pub fn with_search_results(mut self, results: Vec<ProductDefinition>) -> Self {
        self.search_results = results;
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// `fetch_consumed_items` fails with a network error on `date`
    pub fn failing_day(mut self, date: NaiveDate) -> Self {
        self.failing_days.insert(date);
        self
    }

    /// `fetch_consumed_items` fails with an expired session on `date`
    pub fn expired_day(mut self, date: NaiveDate) -> Self {
        self.expired_days.insert(date);
        self
    }

    pub fn failing_goals(mut self) -> Self {
        self.fail_goals = true;
        self
    }

    pub fn failing_add(mut self) -> Self {
        self.fail_add = true;
        self
    }

    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    /// Slow product fetches down so concurrent resolutions overlap
    pub fn with_product_delay(mut self, delay: Duration) -> Self {
        self.product_delay = Some(delay);
        self
    }

    /// Slow the consumed-items, goals and totals calls down by the same delay
    pub fn with_day_delay(mut self, delay: Duration) -> Self {
        self.day_delay = Some(delay);
        self
    }

    async fn day_pause(&self) {
        if let Some(delay) = self.day_delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn edit_day(&self, date: NaiveDate, edit: impl FnOnce(&mut ConsumedItemsPayload)) {
        edit(self.days.lock().unwrap().entry(date).or_default());
    }

    pub fn product_fetches(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub fn recipe_fetches(&self) -> usize {
        self.recipe_calls.load(Ordering::SeqCst)
    }

    pub fn consumed_fetches(&self) -> usize {
        self.consumed_calls.load(Ordering::SeqCst)
    }

    pub fn records_on(&self, date: NaiveDate) -> usize {
        self.days
            .lock()
            .unwrap()
            .get(&date)
            .map_or(0, ConsumedItemsPayload::len)
    }
}

#[async_trait]
impl DiaryGateway for MockGateway {
    async fn fetch_consumed_items(&self, date: NaiveDate) -> AppResult<ConsumedItemsPayload> {
        self.consumed_calls.fetch_add(1, Ordering::SeqCst);
        self.day_pause().await;
        if self.expired_days.contains(&date) {
            return Err(GatewayError::session_expired("token rejected").into());
        }
        if self.failing_days.contains(&date) {
            return Err(AppError::network(format!("consumed items for {date} timed out")));
        }
        Ok(self
            .days
            .lock()
            .unwrap()
            .get(&date)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_goals(&self, _date: NaiveDate) -> AppResult<GoalsSnapshot> {
        self.day_pause().await;
        if self.fail_goals {
            return Err(AppError::network("goals timed out"));
        }
        Ok(self.goals)
    }

    async fn fetch_daily_nutrients(&self, date: NaiveDate) -> AppResult<DailyTotals> {
        self.day_pause().await;
        Ok(DailyTotals {
            date,
            energy_kcal: 1234.0,
            carb: 120.0,
            protein: 80.0,
            fat: 40.0,
        })
    }

    async fn fetch_product(&self, id: &str) -> AppResult<ProductDefinition> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.product_delay {
            tokio::time::sleep(delay).await;
        }
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("product {id}")))
    }

    async fn fetch_recipe(&self, id: &str) -> AppResult<ProductDefinition> {
        self.recipe_calls.fetch_add(1, Ordering::SeqCst);
        self.recipes
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("recipe {id}")))
    }

    async fn add_consumed_item(&self, item: &NewConsumedItem) -> AppResult<()> {
        if self.fail_add {
            return Err(AppError::network("add timed out"));
        }
        let record = portion(
            &item.id,
            &item.product_id,
            item.date,
            item.meal_time,
            item.amount,
            &item.serving,
            item.serving_quantity,
        );
        self.edit_day(item.date, |day| day.products.push(record));
        self.added.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn delete_consumed_item(&self, consumed_id: &str) -> AppResult<()> {
        if self.fail_delete {
            return Err(AppError::network("delete timed out"));
        }
        for day in self.days.lock().unwrap().values_mut() {
            day.products.retain(|p| p.id != consumed_id);
            day.simple_products.retain(|p| p.id != consumed_id);
            day.recipe_portions.retain(|r| r.id != consumed_id);
        }
        self.deleted.lock().unwrap().push(consumed_id.to_owned());
        Ok(())
    }

    async fn search_products(
        &self,
        query: &str,
        country: &str,
        sex: &str,
    ) -> AppResult<Vec<ProductDefinition>> {
        *self.last_search.lock().unwrap() =
            Some((query.to_owned(), country.to_owned(), sex.to_owned()));
        Ok(self.search_results.clone())
    }

    async fn fetch_profile(&self) -> AppResult<UserProfile> {
        self.profile
            .clone()
            .ok_or_else(|| AppError::not_found("profile"))
    }
}

/// Engine over `gateway` with a fresh cache; the gateway handle stays available for assertions
pub fn engine_with(gateway: MockGateway) -> (DiaryEngine, Arc<MockGateway>) {
    init_test_logging();
    let gateway = Arc::new(gateway);
    let engine = DiaryEngine::new(gateway.clone(), Arc::new(ProductCache::new()));
    (engine, gateway)
}
