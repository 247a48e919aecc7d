// ABOUTME: Command implementations for diary-cli
// ABOUTME: Each command drives the session or its engine and hands results to the display helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::display;
use crate::EntryArgs;
use chrono::NaiveDate;
use nutrition_diary::constants::diary::GRAM_SERVING;
use nutrition_diary::diary::entries::grams_for_serving;
use nutrition_diary::diary::{DiaryEngine, DiaryView};
use nutrition_diary::errors::{AppError, AppResult};
use nutrition_diary::models::NewConsumedItem;
use nutrition_diary::session::DiarySession;
use tracing::warn;

pub async fn login(session: &mut DiarySession, email: &str, password: &str) -> AppResult<()> {
    session.login(email, password).await?;
    println!("Logged in as {}", session.email());
    println!("Session saved to {}", session.store().path().display());
    Ok(())
}

pub async fn refresh(session: &mut DiarySession) -> AppResult<()> {
    session.refresh().await?;
    println!("Session refreshed for {}", session.email());
    Ok(())
}

pub async fn logout(session: &mut DiarySession) -> AppResult<()> {
    session.logout().await?;
    println!("Logged out");
    Ok(())
}

pub async fn show(session: &DiarySession, date: NaiveDate) -> AppResult<()> {
    let mut view = DiaryView::new(date);
    view.begin_load(date);
    view.apply(session.engine().reconcile(date).await);

    if let Some(e) = view.last_error() {
        return Err(AppError::new(e.code, e.message.clone()));
    }
    display::diary(&view);
    Ok(())
}

pub async fn recent(session: &DiarySession, date: NaiveDate) -> AppResult<()> {
    let foods = session.engine().recent_foods(date).await?;
    if foods.is_empty() {
        println!("Nothing logged in the last week");
        return Ok(());
    }
    println!("Recently logged");
    display::products(foods.iter().map(AsRef::as_ref));
    Ok(())
}

pub async fn search(session: &DiarySession, query: &str) -> AppResult<()> {
    let engine = session.engine();
    let profile = match engine.gateway().fetch_profile().await {
        Ok(profile) => Some(profile),
        Err(e) if e.is_session_expired() => return Err(e),
        Err(e) => {
            warn!(error = %e, "profile unavailable, searching with defaults");
            None
        }
    };

    let results = engine.search_foods(query, profile.as_ref()).await?;
    if results.is_empty() {
        println!("No results for '{}'", query.trim());
        return Ok(());
    }
    display::products(results.iter());
    Ok(())
}

pub async fn add(session: &DiarySession, entry: &EntryArgs) -> AppResult<()> {
    let engine = session.engine();
    let date = entry.date.unwrap_or_else(crate::today);
    let item = new_item(&engine, entry, date).await?;

    engine.add_item(&item).await?;
    println!("Added entry {}", item.id);
    show(session, date).await
}

pub async fn edit(session: &DiarySession, consumed_id: &str, entry: &EntryArgs) -> AppResult<()> {
    let engine = session.engine();
    let date = entry.date.unwrap_or_else(crate::today);
    let item = new_item(&engine, entry, date).await?;

    if let Err(e) = engine.edit_entry(consumed_id, &item).await {
        if e.is_mutation_inconsistent() {
            eprintln!("Warning: entry {consumed_id} was removed but the new entry was not saved");
            eprintln!("Re-add it with `diary-cli add --product {}`", item.product_id);
        }
        return Err(e);
    }
    println!("Replaced entry {consumed_id} with {}", item.id);
    show(session, date).await
}

pub async fn delete(session: &DiarySession, consumed_id: &str, date: NaiveDate) -> AppResult<()> {
    session.engine().delete_entry(consumed_id).await?;
    println!("Deleted entry {consumed_id}");
    show(session, date).await
}

/// Build the item to log; a named serving is converted to grams via the product definition
async fn new_item(
    engine: &DiaryEngine,
    entry: &EntryArgs,
    date: NaiveDate,
) -> AppResult<NewConsumedItem> {
    let item = match (&entry.serving, entry.quantity) {
        (Some(serving), Some(quantity)) => {
            let product = engine
                .product(&entry.product)
                .await
                .ok_or_else(|| AppError::not_found(format!("product {}", entry.product)))?;
            if product.serving(serving).is_none() {
                let known: Vec<&str> = product.servings().iter().map(|s| s.name.as_str()).collect();
                return Err(AppError::invalid_input(format!(
                    "{} has no serving '{serving}' (known: {})",
                    product.name,
                    known.join(", ")
                )));
            }
            let grams = grams_for_serving(&product, serving, quantity);
            NewConsumedItem::new(&entry.product, date, entry.meal, grams, serving, quantity)
        }
        _ => NewConsumedItem::new(
            &entry.product,
            date,
            entry.meal,
            entry.grams,
            GRAM_SERVING,
            entry.grams,
        ),
    };
    Ok(item)
}
