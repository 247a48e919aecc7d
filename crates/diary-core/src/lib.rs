// ABOUTME: Core types and constants for the nutrition diary client
// ABOUTME: Foundation crate with error handling, diary domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Diary Core
//!
//! Foundation crate providing shared types and constants for the nutrition diary
//! client. It has no network or runtime dependencies so the gateway, the
//! reconciliation engine and the tests can all share one vocabulary.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `GatewayError`
//! - **constants**: Endpoint paths, cache namespaces, and fallback goal values
//! - **models**: Consumed records, product definitions, and reconciled diary snapshots

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (consumed records, products, diary entries, goals)
pub mod models;
