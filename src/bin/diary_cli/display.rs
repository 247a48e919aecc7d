// ABOUTME: Output formatting helpers for diary-cli
// ABOUTME: Diary grouped by meal with progress bars, product lists, and error hints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrition_diary::constants::diary::PORTION_SERVING;
use nutrition_diary::diary::{DiaryView, MacroProgress};
use nutrition_diary::errors::AppError;
use nutrition_diary::models::{DiaryEntry, MealTime, ProductDefinition};

const BAR_WIDTH: usize = 24;

/// Print the diary of the view's date
pub fn diary(view: &DiaryView) {
    println!("\nDiary for {}", view.date().format("%A, %d %B %Y"));
    println!("{}", "=".repeat(60));

    if let Some(progress) = view.progress() {
        progress_line("Energy", "kcal", progress.energy);
        progress_line("Protein", "g", progress.protein);
        progress_line("Carbs", "g", progress.carbs);
        progress_line("Fat", "g", progress.fat);
    }

    for meal in MealTime::ALL {
        let entries: Vec<&DiaryEntry> = view.entries_for(meal).collect();
        println!("\n{} ({:.0} kcal)", meal.label(), view.meal_kcal(meal));
        if entries.is_empty() {
            println!("   -");
            continue;
        }
        for entry in entries {
            entry_line(entry);
        }
    }
    println!();
}

fn entry_line(entry: &DiaryEntry) {
    let amount = if entry.serving == PORTION_SERVING {
        format!("{} portion(s)", entry.serving_quantity)
    } else {
        format!("{:.0} g", entry.amount)
    };
    let marker = if entry.is_unresolved() {
        " (unresolved)"
    } else {
        ""
    };
    println!(
        "   {:<32} {:>10} {:>7.1} kcal  P {:.1}  C {:.1}  F {:.1}{marker}",
        truncate(&entry.name, 32),
        amount,
        entry.kcal,
        entry.protein,
        entry.carbs,
        entry.fat,
    );
    println!("      id {}", entry.consumed_id);
}

fn progress_line(label: &str, unit: &str, progress: MacroProgress) {
    println!(
        "{label:<8} [{}] {:.0}/{:.0} {unit}",
        bar(progress.fraction),
        progress.current,
        progress.goal
    );
}

fn bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Print product definitions with their per-100 g nutrients and servings
pub fn products<'a>(products: impl Iterator<Item = &'a ProductDefinition>) {
    for product in products {
        let n = &product.nutrients;
        println!(
            "   {:<40} {:>6.0} kcal/100g  P {:.1}  C {:.1}  F {:.1}",
            truncate(&product.name, 40),
            n.energy_kcal * 100.0,
            n.protein * 100.0,
            n.carbohydrate * 100.0,
            n.fat * 100.0,
        );
        let servings: Vec<String> = product
            .servings()
            .iter()
            .map(|s| format!("{} ({} g)", s.name, s.size_grams))
            .collect();
        println!("      id {}  servings: {}", product.id, servings.join(", "));
    }
}

/// Follow-up advice for errors the user can act on
pub fn error_hint(error: &AppError) {
    if error.is_session_expired() {
        eprintln!("Run `diary-cli login --email <email>` to sign in again.");
    } else if error.is_network() {
        eprintln!("The nutrition service could not be reached; check your connection.");
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('~');
    short
}
