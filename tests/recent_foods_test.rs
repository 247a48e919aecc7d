// ABOUTME: Integration tests for recent-foods aggregation
// ABOUTME: Dedup across days, exact limit, recipe exclusion, skipped days, and expired sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use chrono::Days;
use common::{date, engine_with, grams, product, recipe_portion, MockGateway};
use nutrition_diary::models::MealTime;
use std::collections::HashSet;

/// A week where every day logs "bread" plus three products unique to that day
fn busy_week() -> MockGateway {
    let today = date(2025, 3, 14);
    let mut gateway = MockGateway::new().with_product(product("bread", "Bread", 2.5, 0.08, 0.45, 0.02, &[]));
    for offset in 0..7u64 {
        let day = today.checked_sub_days(Days::new(offset)).unwrap();
        let mut records = vec![grams(&format!("b{offset}"), "bread", day, MealTime::Breakfast, 60.0)];
        for n in 0..3 {
            let id = format!("p{offset}-{n}");
            gateway = gateway.with_product(product(&id, &id, 1.0, 0.0, 0.0, 0.0, &[]));
            records.push(grams(&format!("c{offset}-{n}"), &id, day, MealTime::Lunch, 100.0));
        }
        gateway = gateway.with_products_on(day, records);
    }
    gateway
}

#[tokio::test]
async fn test_dedups_and_stops_at_limit() -> Result<()> {
    let (engine, _gateway) = engine_with(busy_week());

    let foods = engine.recent_foods_with(date(2025, 3, 14), 7, 20).await?;

    assert_eq!(foods.len(), 20);
    let ids: HashSet<&str> = foods.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids.len(), 20);
    assert_eq!(foods.iter().filter(|f| f.id == "bread").count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_default_window_matches_explicit_one() -> Result<()> {
    let (engine, _gateway) = engine_with(busy_week());

    let foods = engine.recent_foods(date(2025, 3, 14)).await?;
    assert_eq!(foods.len(), 20);
    assert_eq!(foods[0].id, "bread");
    Ok(())
}

#[tokio::test]
async fn test_stops_walking_once_limit_reached() -> Result<()> {
    let (engine, gateway) = engine_with(busy_week());

    let foods = engine.recent_foods_with(date(2025, 3, 14), 7, 4).await?;

    assert_eq!(foods.len(), 4);
    assert_eq!(gateway.consumed_fetches(), 1);
    Ok(())
}

#[tokio::test]
async fn test_recipes_are_not_recent_foods() -> Result<()> {
    let today = date(2025, 3, 14);
    let (engine, gateway) = engine_with(
        MockGateway::new()
            .with_recipe(product("r1", "Lasagne", 520.0, 28.0, 45.0, 24.0, &[]))
            .with_recipes_on(today, vec![recipe_portion("c1", "r1", today, MealTime::Dinner, 1.0)]),
    );

    let foods = engine.recent_foods_with(today, 7, 20).await?;
    assert!(foods.is_empty());
    assert_eq!(gateway.recipe_fetches(), 0);
    assert_eq!(gateway.consumed_fetches(), 7);
    Ok(())
}

#[tokio::test]
async fn test_failed_day_is_skipped() -> Result<()> {
    let today = date(2025, 3, 14);
    let yesterday = date(2025, 3, 13);
    let two_days_ago = date(2025, 3, 12);
    let (engine, _gateway) = engine_with(
        MockGateway::new()
            .with_product(product("a", "Apple", 0.52, 0.0, 0.14, 0.0, &[]))
            .with_product(product("b", "Banana", 0.89, 0.01, 0.23, 0.0, &[]))
            .with_products_on(today, vec![grams("c1", "a", today, MealTime::Snack, 100.0)])
            .with_products_on(yesterday, vec![grams("c2", "x", yesterday, MealTime::Snack, 100.0)])
            .with_products_on(
                two_days_ago,
                vec![grams("c3", "b", two_days_ago, MealTime::Snack, 100.0)],
            )
            .failing_day(yesterday),
    );

    let foods = engine.recent_foods_with(today, 7, 20).await?;
    let ids: Vec<&str> = foods.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    Ok(())
}

#[tokio::test]
async fn test_unresolvable_products_are_skipped() -> Result<()> {
    let today = date(2025, 3, 14);
    let (engine, _gateway) = engine_with(
        MockGateway::new()
            .with_product(product("a", "Apple", 0.52, 0.0, 0.14, 0.0, &[]))
            .with_products_on(
                today,
                vec![
                    grams("c1", "gone", today, MealTime::Snack, 100.0),
                    grams("c2", "a", today, MealTime::Snack, 100.0),
                ],
            ),
    );

    let foods = engine.recent_foods_with(today, 1, 20).await?;
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0].name, "Apple");
    Ok(())
}

#[tokio::test]
async fn test_expired_session_aborts() {
    let today = date(2025, 3, 14);
    let (engine, _gateway) = engine_with(
        MockGateway::new()
            .with_product(product("a", "Apple", 0.52, 0.0, 0.14, 0.0, &[]))
            .with_products_on(today, vec![grams("c1", "a", today, MealTime::Snack, 100.0)])
            .expired_day(date(2025, 3, 13)),
    );

    let error = engine.recent_foods_with(today, 7, 20).await.unwrap_err();
    assert!(error.is_session_expired());
}
