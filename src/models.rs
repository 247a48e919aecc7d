// ABOUTME: Diary data models re-exported from the core crate
// ABOUTME: Consumed records, product definitions, goals, totals, and reconciled snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared with `diary-core`

pub use diary_core::models::*;
