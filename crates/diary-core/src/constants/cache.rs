// ABOUTME: Product cache constants for key namespacing
// ABOUTME: Keeps recipe identifiers from aliasing product identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Prefix applied to recipe identifiers when rendering cache keys
pub const RECIPE_KEY_PREFIX: &str = "recipe:";

/// Prefix applied to product identifiers when rendering cache keys
pub const PRODUCT_KEY_PREFIX: &str = "product:";
