// ABOUTME: Error types re-exported from the core crate
// ABOUTME: AppError, ErrorCode, GatewayError and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling, shared with `diary-core`

pub use diary_core::errors::*;
