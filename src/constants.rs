// ABOUTME: Application constants re-exported from the core crate
// ABOUTME: Endpoints, HTTP defaults, environment variable names, and diary fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain, shared with `diary-core`

pub use diary_core::constants::*;
