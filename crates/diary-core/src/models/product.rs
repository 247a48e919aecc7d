// ABOUTME: Resolved product and recipe definitions plus the user profile
// ABOUTME: ProductDefinition, per-gram NutrientVector, named Serving, and UserProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::diary::GRAM_SERVING;
use serde::{Deserialize, Serialize};

/// Nutrient values per gram of product (or per portion for recipes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientVector {
    /// Energy in kcal
    pub energy_kcal: f64,
    /// Carbohydrates in grams
    pub carbohydrate: f64,
    /// Protein in grams
    pub protein: f64,
    /// Fat in grams
    pub fat: f64,
    /// Fiber in grams
    pub fiber: f64,
    /// Sugar in grams
    pub sugar: f64,
}

/// A named serving unit and its weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Serving {
    /// Display name, e.g. "slice" or "cup"
    pub name: String,
    /// Weight of one serving in grams
    pub size_grams: f64,
}

impl Serving {
    /// The implicit one-gram serving
    #[must_use]
    pub fn gram() -> Self {
        Self {
            name: GRAM_SERVING.to_owned(),
            size_grams: 1.0,
        }
    }
}

/// A product or recipe resolved from the remote food database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProductDefinition")]
pub struct ProductDefinition {
    /// Product or recipe ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Per-gram nutrient vector
    pub nutrients: NutrientVector,
    servings: Vec<Serving>,
}

#[derive(Deserialize)]
struct RawProductDefinition {
    id: String,
    name: String,
    nutrients: NutrientVector,
    #[serde(default)]
    servings: Vec<Serving>,
}

impl From<RawProductDefinition> for ProductDefinition {
    fn from(raw: RawProductDefinition) -> Self {
        Self::new(raw.id, raw.name, raw.nutrients, raw.servings)
    }
}

impl ProductDefinition {
    /// Build a definition; an empty serving list becomes a single implicit gram serving
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        nutrients: NutrientVector,
        servings: Vec<Serving>,
    ) -> Self {
        let servings = if servings.is_empty() {
            vec![Serving::gram()]
        } else {
            servings
        };
        Self {
            id: id.into(),
            name: name.into(),
            nutrients,
            servings,
        }
    }

    /// Servings in the order the service listed them (never empty)
    #[must_use]
    pub fn servings(&self) -> &[Serving] {
        &self.servings
    }

    /// Find a serving by label, ignoring case
    #[must_use]
    pub fn serving(&self, label: &str) -> Option<&Serving> {
        self.servings
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(label))
    }
}

/// Authenticated user's profile; country and sex feed product search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User UUID
    #[serde(default)]
    pub uuid: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// Account email
    #[serde(default)]
    pub email: String,
    /// Country code used for product search
    #[serde(default)]
    pub country: Option<String>,
    /// Sex used for product search
    #[serde(default)]
    pub sex: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialized_empty_servings_become_gram() {
        let json = r#"{"id":"7","name":"Rice","nutrients":{"energy_kcal":3.6,"carbohydrate":0.8,"protein":0.07,"fat":0.01,"fiber":0.0,"sugar":0.0},"servings":[]}"#;
        let p: ProductDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(p.servings(), &[Serving::gram()]);
        assert_eq!(p.serving("gram").map(|s| s.size_grams), Some(1.0));

        let round_trip: ProductDefinition =
            serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(round_trip, p);
    }

    #[test]
    fn test_empty_servings_become_gram() {
        let p = ProductDefinition::new("1", "Oats", NutrientVector::default(), Vec::new());
        assert_eq!(p.servings(), &[Serving::gram()]);
        assert_eq!(p.serving("Gram").map(|s| s.size_grams), Some(1.0));
    }

    #[test]
    fn test_serving_lookup_preserves_listed_servings() {
        let p = ProductDefinition::new(
            "2",
            "Bread",
            NutrientVector::default(),
            vec![
                Serving {
                    name: "slice".to_owned(),
                    size_grams: 20.0,
                },
                Serving {
                    name: "loaf".to_owned(),
                    size_grams: 500.0,
                },
            ],
        );
        assert_eq!(p.servings().len(), 2);
        assert_eq!(p.serving("slice").map(|s| s.size_grams), Some(20.0));
        assert!(p.serving("cup").is_none());
    }
}
