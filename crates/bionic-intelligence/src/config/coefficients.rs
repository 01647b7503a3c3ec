// ABOUTME: Per-domain coefficient tables for stands, topography, water, feeding, resting and weather
// ABOUTME: Serializable tables with defaults used by the elementary scorers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Coefficient tables
//!
//! Each table holds the ranges, decay rates and bonus constants of one scoring
//! domain. Every field has a default and the tables round-trip through JSON so
//! they can be persisted and partially replaced.

use std::collections::BTreeMap;

use bionic_core::models::StandType;
use serde::{Deserialize, Serialize};

/// Suitability coefficients of one stand type, each in [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandCoefficients {
    /// General habitat value
    pub habitat: f64,
    /// Food availability
    pub alimentation: f64,
    /// Resting and bedding value
    pub repos: f64,
    /// Rut suitability
    pub rut: f64,
}

impl StandCoefficients {
    /// Build a coefficient row
    #[must_use]
    pub const fn new(habitat: f64, alimentation: f64, repos: f64, rut: f64) -> Self {
        Self {
            habitat,
            alimentation,
            repos,
            rut,
        }
    }

    /// Mean of the four coefficients
    #[must_use]
    pub fn mean(&self) -> f64 {
        (self.habitat + self.alimentation + self.repos + self.rut) / 4.0
    }

    /// Named coefficients, used by validation
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("habitat", self.habitat),
            ("alimentation", self.alimentation),
            ("repos", self.repos),
            ("rut", self.rut),
        ]
    }
}

/// Stand lookup table with a fallback row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandCoefficientTable {
    /// Coefficients per classified stand
    pub stands: BTreeMap<StandType, StandCoefficients>,
    /// Row used for `unknown` and any stand missing from `stands`
    pub default_stand: StandCoefficients,
}

impl StandCoefficientTable {
    /// Coefficients for a stand, falling back to `default_stand`
    #[must_use]
    pub fn lookup(&self, stand: StandType) -> StandCoefficients {
        self.stands
            .get(&stand)
            .copied()
            .unwrap_or(self.default_stand)
    }
}

impl Default for StandCoefficientTable {
    fn default() -> Self {
        let stands = BTreeMap::from([
            (StandType::Oak, StandCoefficients::new(0.85, 0.95, 0.60, 0.75)),
            (StandType::Beech, StandCoefficients::new(0.75, 0.80, 0.55, 0.65)),
            (StandType::Hardwood, StandCoefficients::new(0.80, 0.75, 0.65, 0.70)),
            (StandType::Mixed, StandCoefficients::new(0.85, 0.70, 0.80, 0.80)),
            (StandType::Conifer, StandCoefficients::new(0.60, 0.30, 0.90, 0.55)),
            (
                StandType::Regeneration,
                StandCoefficients::new(0.80, 0.85, 0.85, 0.85),
            ),
            (StandType::Coppice, StandCoefficients::new(0.75, 0.65, 0.80, 0.70)),
            (StandType::Wetland, StandCoefficients::new(0.70, 0.60, 0.75, 0.60)),
            (StandType::Meadow, StandCoefficients::new(0.45, 0.80, 0.20, 0.50)),
            (StandType::Cropland, StandCoefficients::new(0.35, 0.90, 0.10, 0.40)),
        ]);
        Self {
            stands,
            default_stand: StandCoefficients::new(0.5, 0.5, 0.5, 0.5),
        }
    }
}

/// Slope, relative elevation and aspect scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopographyConfig {
    /// Lower bound of the optimal slope range (degrees)
    pub slope_optimal_min: f64,
    /// Upper bound of the optimal slope range (degrees)
    pub slope_optimal_max: f64,
    /// Points lost per degree outside the optimal range
    pub slope_penalty_per_degree: f64,
    /// Slope beyond which the floor score applies (degrees)
    pub slope_steep_cutoff: f64,
    /// Score for steep and any penalized slope
    pub slope_floor: f64,
    /// Lower bound of the ideal relative elevation (m)
    pub relative_elevation_ideal_min: f64,
    /// Upper bound of the ideal relative elevation (m)
    pub relative_elevation_ideal_max: f64,
    /// Points lost per metre outside the ideal range
    pub relative_elevation_penalty_per_meter: f64,
    /// Minimum relative elevation score
    pub relative_elevation_floor: f64,
    /// Score for south-facing aspects (135-225°)
    pub aspect_south_score: f64,
    /// Score for south-east and south-west aspects (90-135°, 225-270°)
    pub aspect_flank_score: f64,
    /// Score for every other aspect
    pub aspect_other_score: f64,
    /// Score for flat terrain or unknown aspect
    pub aspect_flat_score: f64,
}

impl Default for TopographyConfig {
    fn default() -> Self {
        Self {
            slope_optimal_min: 5.0,
            slope_optimal_max: 15.0,
            slope_penalty_per_degree: 4.0,
            slope_steep_cutoff: 35.0,
            slope_floor: 10.0,
            relative_elevation_ideal_min: 5.0,
            relative_elevation_ideal_max: 30.0,
            relative_elevation_penalty_per_meter: 3.0,
            relative_elevation_floor: 20.0,
            aspect_south_score: 100.0,
            aspect_flank_score: 80.0,
            aspect_other_score: 60.0,
            aspect_flat_score: 70.0,
        }
    }
}

/// Distance decay shared by water, feeding and resting proximity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceDecay {
    /// Distance at or under which the score is 100 (m)
    pub optimal_distance: f64,
    /// Points lost per metre beyond the optimal distance
    pub decay_per_meter: f64,
    /// Distance at or beyond which the score is 0 (m)
    pub max_distance: f64,
}

impl DistanceDecay {
    /// Build a decay curve
    #[must_use]
    pub const fn new(optimal_distance: f64, decay_per_meter: f64, max_distance: f64) -> Self {
        Self {
            optimal_distance,
            decay_per_meter,
            max_distance,
        }
    }
}

/// Water distance and hydrographic feature scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydrologyConfig {
    /// Proximity curve to the nearest water
    pub distance: DistanceDecay,
    /// Base score of the hydro feature scorer
    pub feature_base: f64,
    /// Bonus for a confluence
    pub confluence_bonus: f64,
    /// Bonus for a meander
    pub meander_bonus: f64,
    /// Bonus for a riparian strip
    pub riparian_bonus: f64,
    /// Bonus for a spring
    pub spring_bonus: f64,
    /// Bonus for a pond
    pub pond_bonus: f64,
    /// Bonus for a stream
    pub stream_bonus: f64,
    /// Bonus for a wetland
    pub wetland_bonus: f64,
    /// Bonus for a river or lake
    pub open_water_bonus: f64,
}

impl Default for HydrologyConfig {
    fn default() -> Self {
        Self {
            distance: DistanceDecay::new(100.0, 0.1, 1000.0),
            feature_base: 50.0,
            confluence_bonus: 15.0,
            meander_bonus: 10.0,
            riparian_bonus: 10.0,
            spring_bonus: 10.0,
            pond_bonus: 8.0,
            stream_bonus: 5.0,
            wetland_bonus: 5.0,
            open_water_bonus: 0.0,
        }
    }
}

/// Feeding zone scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingConfig {
    /// Proximity curve to the feeding zone
    pub distance: DistanceDecay,
    /// Points per unit of resource density
    pub density_bonus_factor: f64,
    /// Bonus for mast
    pub mast_bonus: f64,
    /// Bonus for crops
    pub crop_bonus: f64,
    /// Bonus for orchards
    pub orchard_bonus: f64,
    /// Bonus for browse
    pub browse_bonus: f64,
    /// Bonus for meadow grass
    pub meadow_bonus: f64,
}

impl Default for FeedingConfig {
    fn default() -> Self {
        Self {
            distance: DistanceDecay::new(200.0, 0.08, 1500.0),
            density_bonus_factor: 20.0,
            mast_bonus: 10.0,
            crop_bonus: 8.0,
            orchard_bonus: 8.0,
            browse_bonus: 5.0,
            meadow_bonus: 3.0,
        }
    }
}

/// Resting zone scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestingConfig {
    /// Proximity curve to the resting zone
    pub distance: DistanceDecay,
    /// Bonus for dense cover
    pub dense_cover_bonus: f64,
    /// Bonus for moderate cover
    pub moderate_cover_bonus: f64,
    /// Bonus for an escape route
    pub escape_route_bonus: f64,
    /// Bonus for visual cover
    pub visual_cover_bonus: f64,
    /// Bonus for absence of disturbance
    pub disturbance_free_bonus: f64,
}

impl Default for RestingConfig {
    fn default() -> Self {
        Self {
            distance: DistanceDecay::new(300.0, 0.06, 2000.0),
            dense_cover_bonus: 15.0,
            moderate_cover_bonus: 8.0,
            escape_route_bonus: 8.0,
            visual_cover_bonus: 7.0,
            disturbance_free_bonus: 10.0,
        }
    }
}

/// Local wind and temperature scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherScoringConfig {
    /// Lower bound of the ideal wind range (km/h)
    pub wind_ideal_min: f64,
    /// Upper bound of the ideal wind range (km/h)
    pub wind_ideal_max: f64,
    /// Wind above which the high-wind score applies (km/h)
    pub wind_high: f64,
    /// Score under the ideal range
    pub calm_score: f64,
    /// Score above `wind_high`
    pub high_wind_score: f64,
    /// Lower bound of the ideal temperature range (°C)
    pub temperature_ideal_min: f64,
    /// Upper bound of the ideal temperature range (°C)
    pub temperature_ideal_max: f64,
    /// Points lost per degree outside the ideal range
    pub temperature_penalty_per_degree: f64,
    /// Minimum temperature score
    pub temperature_floor: f64,
    /// Bonus when the waypoint offers wind cover
    pub cover_bonus: f64,
}

impl Default for WeatherScoringConfig {
    fn default() -> Self {
        Self {
            wind_ideal_min: 5.0,
            wind_ideal_max: 15.0,
            wind_high: 25.0,
            calm_score: 60.0,
            high_wind_score: 30.0,
            temperature_ideal_min: -5.0,
            temperature_ideal_max: 15.0,
            temperature_penalty_per_degree: 8.0,
            temperature_floor: 20.0,
            cover_bonus: 10.0,
        }
    }
}
