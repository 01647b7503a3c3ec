// ABOUTME: Scoring configuration: category weights, rating thresholds and coefficient tables
// ABOUTME: Provides defaults, invariant validation, shallow merge and persisted-blob overlay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Scoring Configuration Module
//!
//! `ScoringConfig` is the single value every scorer reads. It is organized
//! into top-level sections:
//! - `category_weights` - weights of the six categories, summing to 1
//! - `thresholds` - rating thresholds, strictly descending
//! - `stand_coefficients` - per-stand habitat/alimentation/repos/rut table
//! - `topography`, `hydrology`, `feeding`, `resting`, `weather` - domain tables
//!
//! Updates replace whole sections (shallow merge) and are validated before
//! they are accepted.

pub mod coefficients;
pub mod error;

pub use coefficients::{
    DistanceDecay, FeedingConfig, HydrologyConfig, RestingConfig, StandCoefficientTable,
    StandCoefficients, TopographyConfig, WeatherScoringConfig,
};
pub use error::ConfigError;

use std::iter;

use bionic_core::constants::scores::{MAX_SCORE, MIN_SCORE};
use bionic_core::models::ScoreCategory;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tolerance on the sum of category weights
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

/// Weight of each scoring category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    /// Habitat weight
    pub habitat: f64,
    /// Rut weight
    pub rut: f64,
    /// Salines weight
    pub salines: f64,
    /// Affuts weight
    pub affuts: f64,
    /// Trajets weight
    pub trajets: f64,
    /// Peuplements weight
    pub peuplements: f64,
}

impl CategoryWeights {
    /// Weight of one category
    #[must_use]
    pub const fn get(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Habitat => self.habitat,
            ScoreCategory::Rut => self.rut,
            ScoreCategory::Salines => self.salines,
            ScoreCategory::Affuts => self.affuts,
            ScoreCategory::Trajets => self.trajets,
            ScoreCategory::Peuplements => self.peuplements,
        }
    }

    /// Sum of all weights
    #[must_use]
    pub fn sum(&self) -> f64 {
        ScoreCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            habitat: 0.25,
            rut: 0.20,
            salines: 0.10,
            affuts: 0.20,
            trajets: 0.15,
            peuplements: 0.10,
        }
    }
}

/// Rating thresholds, inclusive lower bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Excellent at or above
    pub excellent: f64,
    /// Good at or above
    pub good: f64,
    /// Moderate at or above
    pub moderate: f64,
    /// Low at or above, poor below
    pub low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            excellent: 85.0,
            good: 70.0,
            moderate: 50.0,
            low: 30.0,
        }
    }
}

/// Complete scoring configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Category weights
    pub category_weights: CategoryWeights,
    /// Rating thresholds
    pub thresholds: Thresholds,
    /// Stand coefficient table
    pub stand_coefficients: StandCoefficientTable,
    /// Topography table
    pub topography: TopographyConfig,
    /// Hydrology table
    pub hydrology: HydrologyConfig,
    /// Feeding table
    pub feeding: FeedingConfig,
    /// Resting table
    pub resting: RestingConfig,
    /// Weather table
    pub weather: WeatherScoringConfig,
}

/// Partial configuration; every present section replaces the current one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfigUpdate {
    /// Replacement weights
    pub category_weights: Option<CategoryWeights>,
    /// Replacement thresholds
    pub thresholds: Option<Thresholds>,
    /// Replacement stand table
    pub stand_coefficients: Option<StandCoefficientTable>,
    /// Replacement topography table
    pub topography: Option<TopographyConfig>,
    /// Replacement hydrology table
    pub hydrology: Option<HydrologyConfig>,
    /// Replacement feeding table
    pub feeding: Option<FeedingConfig>,
    /// Replacement resting table
    pub resting: Option<RestingConfig>,
    /// Replacement weather table
    pub weather: Option<WeatherScoringConfig>,
}

impl ScoringConfigUpdate {
    /// Whether the update carries no section
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl ScoringConfig {
    /// Shallow merge: each section present in `update` replaces the current one
    #[must_use]
    pub fn merged(&self, update: ScoringConfigUpdate) -> Self {
        let current = self.clone();
        Self {
            category_weights: update
                .category_weights
                .unwrap_or(current.category_weights),
            thresholds: update.thresholds.unwrap_or(current.thresholds),
            stand_coefficients: update
                .stand_coefficients
                .unwrap_or(current.stand_coefficients),
            topography: update.topography.unwrap_or(current.topography),
            hydrology: update.hydrology.unwrap_or(current.hydrology),
            feeding: update.feeding.unwrap_or(current.feeding),
            resting: update.resting.unwrap_or(current.resting),
            weather: update.weather.unwrap_or(current.weather),
        }
    }

    /// Overlay the top-level sections of a persisted JSON blob onto `self`
    ///
    /// Unknown keys are ignored so blobs written by newer versions still load.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when the blob is not an object or a
    /// section does not match its schema.
    pub fn overlay_json(&self, persisted: &Value) -> Result<Self, ConfigError> {
        let Value::Object(overrides) = persisted else {
            return Err(ConfigError::Parse(
                "persisted configuration must be a JSON object".to_owned(),
            ));
        };
        let mut base = serde_json::to_value(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let Value::Object(sections) = &mut base {
            for (key, value) in overrides {
                if sections.contains_key(key) {
                    sections.insert(key.clone(), value.clone());
                }
            }
        }
        serde_json::from_value(base).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate every invariant of the configuration
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_weights()?;
        self.validate_thresholds()?;
        self.validate_stands()?;
        self.validate_topography()?;
        self.validate_proximity_tables()?;
        self.validate_weather()
    }

    fn validate_weights(&self) -> Result<(), ConfigError> {
        let weights = &self.category_weights;
        if ScoreCategory::ALL
            .iter()
            .any(|c| !weights.get(*c).is_finite() || weights.get(*c) < 0.0)
        {
            return Err(ConfigError::InvalidWeights(
                "category weights must be finite and non-negative",
            ));
        }
        if (weights.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "category weights must sum to 1.0",
            ));
        }
        Ok(())
    }

    fn validate_thresholds(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let ordered = [t.excellent, t.good, t.moderate, t.low];
        if ordered
            .iter()
            .any(|v| !v.is_finite() || !(0.0..=100.0).contains(v))
        {
            return Err(ConfigError::ValueOutOfRange(
                "thresholds must lie within [0,100]",
            ));
        }
        if !ordered.windows(2).all(|pair| pair[0] > pair[1]) {
            return Err(ConfigError::InvalidRange(
                "thresholds must be strictly descending: excellent > good > moderate > low",
            ));
        }
        Ok(())
    }

    fn validate_stands(&self) -> Result<(), ConfigError> {
        let table = &self.stand_coefficients;
        let rows = table
            .stands
            .iter()
            .map(|(stand, row)| (stand.as_str(), row))
            .chain(iter::once(("default_stand", &table.default_stand)));
        for (stand, row) in rows {
            for (field, value) in row.fields() {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::InvalidCoefficient {
                        stand: stand.to_owned(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_topography(&self) -> Result<(), ConfigError> {
        let topo = &self.topography;
        if topo.slope_optimal_min >= topo.slope_optimal_max {
            return Err(ConfigError::InvalidRange(
                "slope_optimal_min must be < slope_optimal_max",
            ));
        }
        if topo.slope_optimal_max >= topo.slope_steep_cutoff {
            return Err(ConfigError::InvalidRange(
                "slope_optimal_max must be < slope_steep_cutoff",
            ));
        }
        if topo.relative_elevation_ideal_min >= topo.relative_elevation_ideal_max {
            return Err(ConfigError::InvalidRange(
                "relative_elevation_ideal_min must be < relative_elevation_ideal_max",
            ));
        }
        if [topo.slope_penalty_per_degree, topo.relative_elevation_penalty_per_meter]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "topography penalties must be non-negative",
            ));
        }
        let fixed_scores = [
            topo.slope_floor,
            topo.relative_elevation_floor,
            topo.aspect_south_score,
            topo.aspect_flank_score,
            topo.aspect_other_score,
            topo.aspect_flat_score,
        ];
        if !fixed_scores.iter().all(|v| is_score(*v)) {
            return Err(ConfigError::ValueOutOfRange(
                "topography floors and aspect scores must lie within [0,100]",
            ));
        }
        Ok(())
    }

    fn validate_proximity_tables(&self) -> Result<(), ConfigError> {
        for (decay, range_msg, rate_msg) in [
            (
                &self.hydrology.distance,
                "hydrology optimal_distance must be < max_distance",
                "hydrology decay_per_meter must be non-negative",
            ),
            (
                &self.feeding.distance,
                "feeding optimal_distance must be < max_distance",
                "feeding decay_per_meter must be non-negative",
            ),
            (
                &self.resting.distance,
                "resting optimal_distance must be < max_distance",
                "resting decay_per_meter must be non-negative",
            ),
        ] {
            if decay.optimal_distance < 0.0 || decay.optimal_distance >= decay.max_distance {
                return Err(ConfigError::InvalidRange(range_msg));
            }
            if !decay.decay_per_meter.is_finite() || decay.decay_per_meter < 0.0 {
                return Err(ConfigError::ValueOutOfRange(rate_msg));
            }
        }
        Ok(())
    }

    fn validate_weather(&self) -> Result<(), ConfigError> {
        let w = &self.weather;
        if w.wind_ideal_min >= w.wind_ideal_max || w.wind_ideal_max >= w.wind_high {
            return Err(ConfigError::InvalidRange(
                "wind ranges must satisfy wind_ideal_min < wind_ideal_max < wind_high",
            ));
        }
        if w.temperature_ideal_min >= w.temperature_ideal_max {
            return Err(ConfigError::InvalidRange(
                "temperature_ideal_min must be < temperature_ideal_max",
            ));
        }
        if !w.temperature_penalty_per_degree.is_finite() || w.temperature_penalty_per_degree < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "temperature_penalty_per_degree must be non-negative",
            ));
        }
        if ![w.temperature_floor, w.calm_score, w.high_wind_score]
            .iter()
            .all(|v| is_score(*v))
        {
            return Err(ConfigError::ValueOutOfRange(
                "temperature_floor, calm_score and high_wind_score must lie within [0,100]",
            ));
        }
        Ok(())
    }
}

/// Finite and within the score scale; floors feed `f64::clamp` as lower bound
fn is_score(value: f64) -> bool {
    value.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&value)
}
