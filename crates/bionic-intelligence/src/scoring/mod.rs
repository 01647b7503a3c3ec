// ABOUTME: Category aggregators and the weighted composite score for a waypoint
// ABOUTME: Pure, deterministic scoring with rayon-parallel batch scoring of a territory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Scoring Engine
//!
//! Six aggregators each combine a handful of elementary scores into one
//! category value:
//!
//! | Category | Inputs |
//! |----------|--------|
//! | Habitat (H) | feeding .30, resting .30, stand habitat .25, NDVI .15 |
//! | Rut (R) | stand rut .35, transition .25, cover .20, quietness .20 |
//! | Salines (S) | water distance .50, hydro features .30, cover .20 |
//! | Affuts (A) | visibility .25, slope .20, relative elevation (or aspect) .20, thermal .20, trail .15 |
//! | Trajets (T) | corridor .40, trail .30, connectivity .30 |
//! | Peuplements (P) | stand mean .40, NDVI .25, structure .20, diversity .15 |
//!
//! The composite is the weighted sum of the six categories. Nothing here reads
//! the clock, so identical inputs always yield identical scores.

pub mod elementary;

use bionic_core::errors::AppResult;
use bionic_core::models::{ScoreCategory, SubScores, WaypointFeatures};
use rayon::prelude::*;
use tracing::debug;

use crate::config::{CategoryWeights, ScoringConfig};
use elementary::{
    aspect_score, clamp_score, connectivity_score, corridor_score, cover_density_score,
    feeding_zone_score, human_pressure_score, hydro_features_score, ndvi_score,
    relative_elevation_score, resting_zone_score, round1, slope_score, stand_diversity_score,
    stand_score, structure_score, thermal_score, trail_score, transition_score,
    visibility_score, water_distance_score, StandFactor,
};

/// Weighted sum of `(weight, score)` pairs, clamped
fn weighted(parts: &[(f64, f64)]) -> f64 {
    clamp_score(parts.iter().map(|(w, s)| w * s).sum())
}

/// Habitat (H): food and shelter around the waypoint
#[must_use]
pub fn calculate_habitat_score(features: &WaypointFeatures, config: &ScoringConfig) -> f64 {
    weighted(&[
        (
            0.30,
            feeding_zone_score(features.feeding_zone.as_ref(), &config.feeding),
        ),
        (
            0.30,
            resting_zone_score(features.resting_zone.as_ref(), &config.resting),
        ),
        (
            0.25,
            stand_score(
                features.stand_type,
                StandFactor::Habitat,
                &config.stand_coefficients,
            ),
        ),
        (0.15, ndvi_score(features.ndvi)),
    ])
}

/// Rut (R): rutting stand value, edges, cover and quietness
#[must_use]
pub fn calculate_rut_score(features: &WaypointFeatures, config: &ScoringConfig) -> f64 {
    weighted(&[
        (
            0.35,
            stand_score(
                features.stand_type,
                StandFactor::Rut,
                &config.stand_coefficients,
            ),
        ),
        (
            0.25,
            transition_score(features.is_transition, &features.adjacent_stands),
        ),
        (0.20, cover_density_score(features.cover_density)),
        (0.20, human_pressure_score(features.human_pressure)),
    ])
}

/// Salines (S): water and mineral potential
#[must_use]
pub fn calculate_salines_score(features: &WaypointFeatures, config: &ScoringConfig) -> f64 {
    weighted(&[
        (
            0.50,
            water_distance_score(features.water_distance, &config.hydrology),
        ),
        (0.30, hydro_features_score(features, &config.hydrology)),
        (0.20, cover_density_score(features.cover_density)),
    ])
}

/// Affuts (A): quality of the spot as a stand or blind
#[must_use]
pub fn calculate_affuts_score(features: &WaypointFeatures, config: &ScoringConfig) -> f64 {
    let topo = &config.topography;
    // Aspect stands in when relative elevation is unknown.
    let elevation = if features.relative_elevation.is_some() {
        relative_elevation_score(features.relative_elevation, topo)
    } else {
        aspect_score(features.aspect, topo)
    };
    weighted(&[
        (0.25, visibility_score(features.visibility)),
        (0.20, slope_score(features.slope, topo)),
        (0.20, elevation),
        (
            0.20,
            thermal_score(features.thermal.as_ref(), &config.weather),
        ),
        (0.15, trail_score(features.corridor.as_ref())),
    ])
}

/// Trajets (T): travel corridors
#[must_use]
pub fn calculate_trajets_score(features: &WaypointFeatures) -> f64 {
    let corridor = features.corridor.as_ref();
    weighted(&[
        (0.40, corridor_score(corridor)),
        (0.30, trail_score(corridor)),
        (0.30, connectivity_score(corridor)),
    ])
}

/// Peuplements (P): forest stand quality
#[must_use]
pub fn calculate_peuplements_score(features: &WaypointFeatures, config: &ScoringConfig) -> f64 {
    weighted(&[
        (
            0.40,
            stand_score(
                features.stand_type,
                StandFactor::Mean,
                &config.stand_coefficients,
            ),
        ),
        (0.25, ndvi_score(features.ndvi)),
        (0.20, structure_score(features.structure_score)),
        (
            0.15,
            stand_diversity_score(features.stand_type, &features.adjacent_stands),
        ),
    ])
}

/// Weighted composite of the six categories
#[must_use]
pub fn calculate_bionic_score(scores: &SubScores, weights: &CategoryWeights) -> f64 {
    clamp_score(
        ScoreCategory::ALL
            .iter()
            .map(|c| weights.get(*c) * scores.get(*c))
            .sum(),
    )
}

/// Score one waypoint
///
/// Sub-scores and composite are rounded to one decimal. The composite is
/// computed from the rounded sub-scores so the published numbers add up.
///
/// # Errors
///
/// Returns a validation error when the features are malformed.
pub fn get_scores_for_waypoint(
    features: &WaypointFeatures,
    config: &ScoringConfig,
) -> AppResult<SubScores> {
    features.validate()?;

    let mut scores = SubScores {
        habitat: round1(calculate_habitat_score(features, config)),
        rut: round1(calculate_rut_score(features, config)),
        salines: round1(calculate_salines_score(features, config)),
        affuts: round1(calculate_affuts_score(features, config)),
        trajets: round1(calculate_trajets_score(features)),
        peuplements: round1(calculate_peuplements_score(features, config)),
        composite: 0.0,
    };
    scores.composite = round1(calculate_bionic_score(&scores, &config.category_weights));

    debug!(
        latitude = features.latitude,
        longitude = features.longitude,
        composite = scores.composite,
        "Scored waypoint"
    );
    Ok(scores)
}

/// Score many waypoints in parallel, preserving input order
#[must_use]
pub fn score_territory(
    waypoints: &[WaypointFeatures],
    config: &ScoringConfig,
) -> Vec<AppResult<SubScores>> {
    waypoints
        .par_iter()
        .map(|features| get_scores_for_waypoint(features, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bionic_core::models::StandType;

    #[test]
    fn test_minimal_waypoint_scores_in_range() {
        let features = WaypointFeatures::new(46.0, 4.0, 300.0, 10.0, 100.0, 0.8);
        let scores = get_scores_for_waypoint(&features, &ScoringConfig::default()).unwrap();
        for category in ScoreCategory::ALL {
            let value = scores.get(category);
            assert!((0.0..=100.0).contains(&value), "{category} = {value}");
        }
        assert!((0.0..=100.0).contains(&scores.composite));
    }

    #[test]
    fn test_trajets_neutral_without_corridor() {
        let features = WaypointFeatures::new(46.0, 4.0, 300.0, 10.0, 100.0, 0.5);
        assert!((calculate_trajets_score(&features) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_oak_beats_cropland_for_habitat() {
        let config = ScoringConfig::default();
        let mut oak = WaypointFeatures::new(46.0, 4.0, 300.0, 10.0, 100.0, 0.6);
        oak.stand_type = StandType::Oak;
        let mut crop = oak.clone();
        crop.stand_type = StandType::Cropland;
        assert!(calculate_habitat_score(&oak, &config) > calculate_habitat_score(&crop, &config));
    }
}
