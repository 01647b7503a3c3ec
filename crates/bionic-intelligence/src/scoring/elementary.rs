// ABOUTME: Elementary scorers mapping a single waypoint feature to a 0-100 value
// ABOUTME: Range penalties, distance decay, table lookups and neutral defaults for missing data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Elementary scorers
//!
//! Every function is pure and returns a value in [0,100]. Optional inputs that
//! are absent score [`NEUTRAL_SCORE`] unless documented otherwise.

use std::collections::BTreeSet;

use bionic_core::constants::scores::{MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE};
use bionic_core::models::{
    CorridorData, CoverDensity, FeedingKind, FeedingZone, RestingZone, StandType,
    ThermalConditions, TrailType, WaterType, WaypointFeatures,
};

use crate::config::{
    DistanceDecay, FeedingConfig, HydrologyConfig, RestingConfig, StandCoefficientTable,
    TopographyConfig, WeatherScoringConfig,
};

/// NDVI at or above which vegetation scores 100
const NDVI_SATURATION: f64 = 0.8;
/// Trail distance at or under which proximity scores 100 (m)
const TRAIL_NEAR_METERS: f64 = 50.0;
/// Trail distance at or beyond which proximity bottoms out (m)
const TRAIL_FAR_METERS: f64 = 500.0;
/// Proximity score of a distant trail
const TRAIL_FAR_SCORE: f64 = 20.0;

/// Which coefficient of a stand row to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandFactor {
    /// Habitat coefficient
    Habitat,
    /// Food coefficient
    Alimentation,
    /// Resting coefficient
    Repos,
    /// Rut coefficient
    Rut,
    /// Mean of the four coefficients
    Mean,
}

/// Clamp to [0,100]
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// Round to one decimal place
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Score 100 inside `[min, max]`, losing `penalty` points per unit outside
fn range_score(value: f64, min: f64, max: f64, penalty: f64) -> f64 {
    let distance = if value < min {
        min - value
    } else if value > max {
        value - max
    } else {
        0.0
    };
    MAX_SCORE - penalty * distance
}

/// Proximity score: 100 up to the optimal distance, linear decay, 0 at the cutoff
#[must_use]
pub fn distance_decay_score(distance: f64, decay: &DistanceDecay) -> f64 {
    if distance >= decay.max_distance {
        return MIN_SCORE;
    }
    if distance <= decay.optimal_distance {
        return MAX_SCORE;
    }
    clamp_score(MAX_SCORE - decay.decay_per_meter * (distance - decay.optimal_distance))
}

/// Slope score: optimal range, linear penalty, floor beyond the steep cutoff
#[must_use]
pub fn slope_score(slope: f64, topo: &TopographyConfig) -> f64 {
    if slope > topo.slope_steep_cutoff {
        return topo.slope_floor;
    }
    range_score(
        slope,
        topo.slope_optimal_min,
        topo.slope_optimal_max,
        topo.slope_penalty_per_degree,
    )
    .clamp(topo.slope_floor, MAX_SCORE)
}

/// Relative elevation score, neutral when unknown
#[must_use]
pub fn relative_elevation_score(relative: Option<f64>, topo: &TopographyConfig) -> f64 {
    relative.map_or(NEUTRAL_SCORE, |value| {
        range_score(
            value,
            topo.relative_elevation_ideal_min,
            topo.relative_elevation_ideal_max,
            topo.relative_elevation_penalty_per_meter,
        )
        .clamp(topo.relative_elevation_floor, MAX_SCORE)
    })
}

/// Aspect score; `None` means flat or unknown
#[must_use]
pub fn aspect_score(aspect: Option<f64>, topo: &TopographyConfig) -> f64 {
    let Some(aspect) = aspect else {
        return topo.aspect_flat_score;
    };
    let bearing = aspect.rem_euclid(360.0);
    if (135.0..=225.0).contains(&bearing) {
        topo.aspect_south_score
    } else if (90.0..135.0).contains(&bearing) || (225.0..=270.0).contains(&bearing) {
        topo.aspect_flank_score
    } else {
        topo.aspect_other_score
    }
}

/// Proximity to the nearest water
#[must_use]
pub fn water_distance_score(distance: f64, hydro: &HydrologyConfig) -> f64 {
    distance_decay_score(distance, &hydro.distance)
}

/// Hydrographic features: base plus flag and water-type bonuses
#[must_use]
pub fn hydro_features_score(features: &WaypointFeatures, hydro: &HydrologyConfig) -> f64 {
    let mut score = hydro.feature_base;
    if features.has_confluence {
        score += hydro.confluence_bonus;
    }
    if features.has_meander {
        score += hydro.meander_bonus;
    }
    if features.is_riparian {
        score += hydro.riparian_bonus;
    }
    score += match features.water_type {
        Some(WaterType::Spring) => hydro.spring_bonus,
        Some(WaterType::Pond) => hydro.pond_bonus,
        Some(WaterType::Stream) => hydro.stream_bonus,
        Some(WaterType::Wetland) => hydro.wetland_bonus,
        Some(WaterType::River | WaterType::Lake) => hydro.open_water_bonus,
        None => 0.0,
    };
    clamp_score(score)
}

/// Vegetation vigour: 0 at or under 0, 100 at or above 0.8, linear between
#[must_use]
pub fn ndvi_score(ndvi: f64) -> f64 {
    if ndvi <= 0.0 {
        MIN_SCORE
    } else if ndvi >= NDVI_SATURATION {
        MAX_SCORE
    } else {
        ndvi / NDVI_SATURATION * MAX_SCORE
    }
}

/// Stand coefficient scaled to 0-100
#[must_use]
pub fn stand_score(stand: StandType, factor: StandFactor, table: &StandCoefficientTable) -> f64 {
    let row = table.lookup(stand);
    let coefficient = match factor {
        StandFactor::Habitat => row.habitat,
        StandFactor::Alimentation => row.alimentation,
        StandFactor::Repos => row.repos,
        StandFactor::Rut => row.rut,
        StandFactor::Mean => row.mean(),
    };
    clamp_score(coefficient * MAX_SCORE)
}

/// Edge value: transitions gain with the number of bordering stands
#[must_use]
pub fn transition_score(is_transition: bool, adjacent: &[StandType]) -> f64 {
    if is_transition {
        clamp_score(80.0 + 5.0 * adjacent.len() as f64)
    } else if adjacent.is_empty() {
        NEUTRAL_SCORE
    } else {
        40.0
    }
}

/// Understorey cover
#[must_use]
pub fn cover_density_score(cover: Option<CoverDensity>) -> f64 {
    match cover {
        Some(CoverDensity::Dense) => 90.0,
        Some(CoverDensity::Moderate) => 70.0,
        Some(CoverDensity::Sparse) => 35.0,
        None => NEUTRAL_SCORE,
    }
}

/// Corridor presence; narrow corridors funnel game
#[must_use]
pub fn corridor_score(corridor: Option<&CorridorData>) -> f64 {
    let Some(corridor) = corridor else {
        return NEUTRAL_SCORE;
    };
    if !corridor.on_corridor {
        return 30.0;
    }
    match corridor.width_meters {
        Some(width) if width <= 10.0 => 95.0,
        Some(_) => 80.0,
        None => 85.0,
    }
}

/// Trail proximity, adjusted for who uses the trail
#[must_use]
pub fn trail_score(corridor: Option<&CorridorData>) -> f64 {
    let Some(distance) = corridor.and_then(|c| c.trail_distance) else {
        return NEUTRAL_SCORE;
    };
    let proximity = if distance <= TRAIL_NEAR_METERS {
        MAX_SCORE
    } else if distance >= TRAIL_FAR_METERS {
        TRAIL_FAR_SCORE
    } else {
        let span = TRAIL_FAR_METERS - TRAIL_NEAR_METERS;
        MAX_SCORE - (MAX_SCORE - TRAIL_FAR_SCORE) * (distance - TRAIL_NEAR_METERS) / span
    };
    let usage = match corridor.and_then(|c| c.trail_type) {
        Some(TrailType::Game) | None => 0.0,
        Some(TrailType::Forestry) => -10.0,
        Some(TrailType::Footpath) => -20.0,
        Some(TrailType::Road) => -35.0,
    };
    clamp_score(proximity + usage)
}

/// Landscape connectivity scaled to 0-100
#[must_use]
pub fn connectivity_score(corridor: Option<&CorridorData>) -> f64 {
    corridor.map_or(NEUTRAL_SCORE, |c| clamp_score(c.connectivity * MAX_SCORE))
}

/// Feeding zone: proximity plus density and resource bonuses
#[must_use]
pub fn feeding_zone_score(zone: Option<&FeedingZone>, feeding: &FeedingConfig) -> f64 {
    let Some(zone) = zone else {
        return NEUTRAL_SCORE;
    };
    let kind_bonus = match zone.kind {
        FeedingKind::Mast => feeding.mast_bonus,
        FeedingKind::Crop => feeding.crop_bonus,
        FeedingKind::Orchard => feeding.orchard_bonus,
        FeedingKind::Browse => feeding.browse_bonus,
        FeedingKind::Meadow => feeding.meadow_bonus,
        FeedingKind::Other => 0.0,
    };
    clamp_score(
        distance_decay_score(zone.distance, &feeding.distance)
            + feeding.density_bonus_factor * zone.density
            + kind_bonus,
    )
}

/// Resting zone: proximity plus cover and tranquillity bonuses
#[must_use]
pub fn resting_zone_score(zone: Option<&RestingZone>, resting: &RestingConfig) -> f64 {
    let Some(zone) = zone else {
        return NEUTRAL_SCORE;
    };
    let mut score = distance_decay_score(zone.distance, &resting.distance);
    score += match zone.cover_density {
        CoverDensity::Dense => resting.dense_cover_bonus,
        CoverDensity::Moderate => resting.moderate_cover_bonus,
        CoverDensity::Sparse => 0.0,
    };
    if zone.has_escape_route {
        score += resting.escape_route_bonus;
    }
    if zone.has_visual_cover {
        score += resting.visual_cover_bonus;
    }
    if zone.disturbance_free {
        score += resting.disturbance_free_bonus;
    }
    clamp_score(score)
}

/// Wind component of the thermal score
#[must_use]
pub fn wind_score(wind_speed: f64, weather: &WeatherScoringConfig) -> f64 {
    if wind_speed < weather.wind_ideal_min {
        weather.calm_score
    } else if wind_speed <= weather.wind_ideal_max {
        MAX_SCORE
    } else if wind_speed > weather.wind_high {
        weather.high_wind_score
    } else {
        let span = weather.wind_high - weather.wind_ideal_max;
        let progress = (wind_speed - weather.wind_ideal_max) / span;
        MAX_SCORE - (MAX_SCORE - weather.high_wind_score) * progress
    }
}

/// Temperature component of the thermal score
#[must_use]
pub fn temperature_score(temperature: f64, weather: &WeatherScoringConfig) -> f64 {
    range_score(
        temperature,
        weather.temperature_ideal_min,
        weather.temperature_ideal_max,
        weather.temperature_penalty_per_degree,
    )
    .clamp(weather.temperature_floor, MAX_SCORE)
}

/// Local thermal comfort: mean of wind and temperature plus cover bonus
#[must_use]
pub fn thermal_score(thermal: Option<&ThermalConditions>, weather: &WeatherScoringConfig) -> f64 {
    let Some(thermal) = thermal else {
        return NEUTRAL_SCORE;
    };
    let mean = (wind_score(thermal.wind_speed, weather)
        + temperature_score(thermal.temperature, weather))
        / 2.0;
    let bonus = if thermal.has_cover {
        weather.cover_bonus
    } else {
        0.0
    };
    clamp_score(mean + bonus)
}

/// Field of view
#[must_use]
pub fn visibility_score(visibility: Option<f64>) -> f64 {
    visibility.map_or(NEUTRAL_SCORE, clamp_score)
}

/// Quietness: 100 minus human pressure
#[must_use]
pub fn human_pressure_score(pressure: Option<f64>) -> f64 {
    pressure.map_or(NEUTRAL_SCORE, |p| clamp_score(MAX_SCORE - p))
}

/// Vertical vegetation structure
#[must_use]
pub fn structure_score(structure: Option<f64>) -> f64 {
    structure.map_or(NEUTRAL_SCORE, clamp_score)
}

/// Diversity of bordering stands other than the main one
#[must_use]
pub fn stand_diversity_score(main: StandType, adjacent: &[StandType]) -> f64 {
    let distinct: BTreeSet<StandType> = adjacent
        .iter()
        .copied()
        .filter(|s| *s != main && *s != StandType::Unknown)
        .collect();
    match distinct.len() {
        0 => 30.0,
        1 => 60.0,
        2 => 80.0,
        _ => MAX_SCORE,
    }
}
