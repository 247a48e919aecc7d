// ABOUTME: Main library entry point for the nutrition diary client
// ABOUTME: Diary reconciliation engine, shared product cache, and remote service gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Diary
//!
//! Client library for a remote nutrition-tracking service. Given a date it
//! fetches the logged items, goals and server totals concurrently, resolves
//! every item to a product definition through a session-wide cache, and
//! produces a snapshot grouped by meal.
//!
//! ```rust,no_run
//! use nutrition_diary::config::{GatewayConfig, SessionStore};
//! use nutrition_diary::session::DiarySession;
//! # async fn example() -> Result<(), nutrition_diary::errors::AppError> {
//! let session = DiarySession::open(GatewayConfig::from_env()?, SessionStore::default_location()?)?;
//! let today = chrono::Local::now().date_naive();
//! let result = session.engine().reconcile(today).await;
//! for entry in result.snapshot?.entries {
//!     println!("{} {} {:.1} kcal", entry.meal_time, entry.name, entry.kcal);
//! }
//! # Ok(())
//! # }
//! ```

/// Product cache shared across reconciliations
pub mod cache;

/// Gateway configuration and session persistence
pub mod config;

/// Application constants
pub mod constants;

/// Reconciliation engine, recent foods, mutations, and view state
pub mod diary;

/// Error types
pub mod errors;

/// Remote service gateway
pub mod gateway;

/// Structured logging setup
pub mod logging;

/// Data models
pub mod models;

/// Authenticated session lifecycle
pub mod session;
