// ABOUTME: Meal-time slot model for diary entries
// ABOUTME: MealTime enum with display ordering, labels, and lenient parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meal-time slot a consumed item belongs to
///
/// The declaration order is the display order: breakfast, lunch, dinner, snack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealTime {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Dinner
    Dinner,
    /// Snack
    Snack,
}

impl MealTime {
    /// All meal times in display order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// Sort rank used when grouping entries
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Self::Breakfast => 0,
            Self::Lunch => 1,
            Self::Dinner => 2,
            Self::Snack => 3,
        }
    }

    /// Wire name used by the remote service
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Section heading shown above a meal group
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snacks",
        }
    }

    /// Parse a meal time, accepting the plural "snacks" and any casing
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(Self::Breakfast),
            "lunch" => Some(Self::Lunch),
            "dinner" => Some(Self::Dinner),
            "snack" | "snacks" => Some(Self::Snack),
            _ => None,
        }
    }
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_all() {
        let orders: Vec<u8> = MealTime::ALL.iter().map(|m| m.order()).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_parse_accepts_plural_snacks() {
        assert_eq!(MealTime::parse("Snacks"), Some(MealTime::Snack));
        assert_eq!(MealTime::parse("brunch"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&MealTime::Dinner).unwrap();
        assert_eq!(json, "\"dinner\"");
        let parsed: MealTime = serde_json::from_str("\"snack\"").unwrap();
        assert_eq!(parsed, MealTime::Snack);
    }
}
