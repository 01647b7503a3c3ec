// ABOUTME: Normalizes raw terrain, vegetation and hydrography inputs into canonical waypoint features
// ABOUTME: Derives missing slope and relative elevation, maps French/English labels, clamps indices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Data Adapter
//!
//! Upstream collaborators (terrain service, vegetation classification,
//! hydrography, user input) deliver loosely typed data. [`DataAdapter`]
//! turns it into a [`WaypointFeatures`] the scoring engine accepts.
//!
//! Missing optional values stay `None` so scorers apply their neutral
//! default. Coordinates and elevation are required, and so is slope unless
//! it can be derived from neighbour elevations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use bionic_core::errors::{AppError, AppResult};
use bionic_core::models::{
    CorridorData, CoverDensity, FeedingZone, RestingZone, Season, StandType, ThermalConditions,
    WaterType, WaypointFeatures,
};

/// Grid spacing of neighbour elevations when none is configured
pub const DEFAULT_CELL_SIZE_METERS: f64 = 30.0;
/// Water distance used when hydrography has nothing nearby
pub const UNKNOWN_WATER_DISTANCE: f64 = 5000.0;
/// NDVI assumed when vegetation data is missing; maps to a neutral score
pub const NEUTRAL_NDVI: f64 = 0.4;

/// Terrain service output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTerrain {
    /// Elevation (m)
    pub elevation: Option<f64>,
    /// Slope (degrees)
    pub slope: Option<f64>,
    /// Aspect (degrees, any range)
    pub aspect: Option<f64>,
    /// Elevation above the local mean, if precomputed
    pub relative_elevation: Option<f64>,
    /// Elevations of the surrounding grid cells
    #[serde(alias = "neighbour_elevations")]
    pub neighbor_elevations: Vec<f64>,
}

/// Vegetation service output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawVegetation {
    /// Vegetation index
    pub ndvi: Option<f64>,
    /// Free-text stand label
    #[serde(alias = "stand_type", alias = "peuplement")]
    pub stand: Option<String>,
    /// Free-text labels of adjacent stands
    pub adjacent_stands: Vec<String>,
    /// Canopy cover (%)
    pub canopy_cover: Option<f64>,
    /// Vertical structure score (0-100)
    pub structure_score: Option<f64>,
}

/// Hydrography service output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawHydrography {
    /// Distance to the nearest water (m)
    pub nearest_water_distance: Option<f64>,
    /// Free-text water feature label
    pub water_type: Option<String>,
    /// Confluence nearby
    pub has_confluence: bool,
    /// Meander nearby
    pub has_meander: bool,
    /// Riparian zone
    pub is_riparian: bool,
}

/// Everything known about a waypoint before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWaypointInput {
    /// Latitude
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    /// Longitude
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: Option<f64>,
    /// Terrain
    pub terrain: RawTerrain,
    /// Vegetation
    pub vegetation: RawVegetation,
    /// Hydrography
    pub hydrography: RawHydrography,
    /// Explicit stand-edge flag, derived from adjacent stands otherwise
    pub is_transition: Option<bool>,
    /// Thermal inputs
    pub thermal: Option<ThermalConditions>,
    /// Corridor inputs
    pub corridor: Option<CorridorData>,
    /// Nearest feeding zone
    pub feeding_zone: Option<FeedingZone>,
    /// Nearest resting zone
    pub resting_zone: Option<RestingZone>,
    /// Visibility (0-100)
    pub visibility: Option<f64>,
    /// Human pressure (0-100)
    pub human_pressure: Option<f64>,
    /// Season of observation
    pub season: Option<Season>,
    /// Free-text context
    pub context: Option<String>,
}

/// Turns raw collaborator data into canonical features
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataAdapter {
    cell_size_meters: f64,
}

impl Default for DataAdapter {
    fn default() -> Self {
        Self {
            cell_size_meters: DEFAULT_CELL_SIZE_METERS,
        }
    }
}

/// Lowercase, strip common accents, collapse separators
fn fold_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            '_' | '-' => ' ',
            other => other,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Match the whole label first, then any single word of it
fn match_alias<T: Copy>(label: &str, table: &[(&str, T)]) -> Option<T> {
    let folded = fold_label(label);
    let lookup = |key: &str| table.iter().find(|(alias, _)| *alias == key).map(|(_, v)| *v);
    lookup(&folded).or_else(|| folded.split(' ').find_map(lookup))
}

const STAND_ALIASES: &[(&str, StandType)] = &[
    ("oak", StandType::Oak),
    ("chene", StandType::Oak),
    ("chenaie", StandType::Oak),
    ("beech", StandType::Beech),
    ("hetre", StandType::Beech),
    ("hetraie", StandType::Beech),
    ("hardwood", StandType::Hardwood),
    ("broadleaf", StandType::Hardwood),
    ("feuillus", StandType::Hardwood),
    ("mixed", StandType::Mixed),
    ("mixte", StandType::Mixed),
    ("conifer", StandType::Conifer),
    ("coniferous", StandType::Conifer),
    ("resineux", StandType::Conifer),
    ("pine", StandType::Conifer),
    ("pin", StandType::Conifer),
    ("spruce", StandType::Conifer),
    ("epicea", StandType::Conifer),
    ("sapin", StandType::Conifer),
    ("regeneration", StandType::Regeneration),
    ("plantation", StandType::Regeneration),
    ("coppice", StandType::Coppice),
    ("taillis", StandType::Coppice),
    ("wetland", StandType::Wetland),
    ("marais", StandType::Wetland),
    ("marsh", StandType::Wetland),
    ("meadow", StandType::Meadow),
    ("grassland", StandType::Meadow),
    ("prairie", StandType::Meadow),
    ("pre", StandType::Meadow),
    ("cropland", StandType::Cropland),
    ("crop", StandType::Cropland),
    ("culture", StandType::Cropland),
    ("cultures", StandType::Cropland),
    ("champ", StandType::Cropland),
];

const WATER_ALIASES: &[(&str, WaterType)] = &[
    ("spring", WaterType::Spring),
    ("source", WaterType::Spring),
    ("pond", WaterType::Pond),
    ("mare", WaterType::Pond),
    ("etang", WaterType::Pond),
    ("stream", WaterType::Stream),
    ("brook", WaterType::Stream),
    ("ruisseau", WaterType::Stream),
    ("wetland", WaterType::Wetland),
    ("marais", WaterType::Wetland),
    ("tourbiere", WaterType::Wetland),
    ("river", WaterType::River),
    ("riviere", WaterType::River),
    ("fleuve", WaterType::River),
    ("lake", WaterType::Lake),
    ("lac", WaterType::Lake),
];

/// Stand type of a free-text label, `Unknown` when unrecognized
#[must_use]
pub fn parse_stand_label(label: &str) -> StandType {
    match_alias(label, STAND_ALIASES).unwrap_or_default()
}

/// Water type of a free-text label
#[must_use]
pub fn parse_water_label(label: &str) -> Option<WaterType> {
    match_alias(label, WATER_ALIASES)
}

/// Cover density from canopy cover percentage
#[must_use]
pub fn cover_from_canopy(canopy_percent: f64) -> CoverDensity {
    if canopy_percent < 35.0 {
        CoverDensity::Sparse
    } else if canopy_percent < 70.0 {
        CoverDensity::Moderate
    } else {
        CoverDensity::Dense
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn clamp_index(value: Option<f64>, min: f64, max: f64) -> Option<f64> {
    finite(value).map(|v| v.clamp(min, max))
}

impl DataAdapter {
    /// Adapter for neighbour grids spaced `cell_size_meters` apart
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` unless the cell size is positive and finite
    pub fn new(cell_size_meters: f64) -> AppResult<Self> {
        if cell_size_meters.is_finite() && cell_size_meters > 0.0 {
            Ok(Self { cell_size_meters })
        } else {
            Err(AppError::out_of_range("cell_size_meters", cell_size_meters))
        }
    }

    /// Steepest gradient towards a neighbour, in degrees
    #[must_use]
    pub fn slope_from_neighbors(&self, elevation: f64, neighbors: &[f64]) -> Option<f64> {
        neighbors
            .iter()
            .filter(|n| n.is_finite())
            .map(|n| (n - elevation).abs())
            .reduce(f64::max)
            .map(|rise| (rise / self.cell_size_meters).atan().to_degrees())
    }

    /// Elevation above the mean of the neighbours
    #[must_use]
    pub fn relative_elevation(elevation: f64, neighbors: &[f64]) -> Option<f64> {
        let usable: Vec<f64> = neighbors.iter().copied().filter(|n| n.is_finite()).collect();
        if usable.is_empty() {
            return None;
        }
        let mean = usable.iter().sum::<f64>() / usable.len() as f64;
        Some(elevation - mean)
    }

    /// Canonical features from raw inputs
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` for absent coordinates, elevation or
    /// underivable slope, and the validation error of the resulting record.
    pub fn normalize(&self, raw: &RawWaypointInput) -> AppResult<WaypointFeatures> {
        let latitude = finite(raw.latitude).ok_or_else(|| AppError::missing_field("latitude"))?;
        let longitude =
            finite(raw.longitude).ok_or_else(|| AppError::missing_field("longitude"))?;
        let terrain = &raw.terrain;
        let elevation =
            finite(terrain.elevation).ok_or_else(|| AppError::missing_field("terrain.elevation"))?;
        let slope = finite(terrain.slope)
            .or_else(|| self.slope_from_neighbors(elevation, &terrain.neighbor_elevations))
            .ok_or_else(|| AppError::missing_field("terrain.slope"))?;

        let vegetation = &raw.vegetation;
        let stand_type = vegetation
            .stand
            .as_deref()
            .map_or(StandType::Unknown, parse_stand_label);
        let adjacent_stands: Vec<StandType> = vegetation
            .adjacent_stands
            .iter()
            .map(|label| parse_stand_label(label))
            .filter(|stand| *stand != StandType::Unknown)
            .collect();
        let is_transition = raw
            .is_transition
            .unwrap_or_else(|| adjacent_stands.iter().any(|stand| *stand != stand_type));

        let water_distance = finite(raw.hydrography.nearest_water_distance).map_or_else(
            || {
                debug!(
                    latitude,
                    longitude,
                    fallback = UNKNOWN_WATER_DISTANCE,
                    "Water distance unavailable, using default"
                );
                UNKNOWN_WATER_DISTANCE
            },
            |d| d.max(0.0),
        );
        let ndvi = clamp_index(vegetation.ndvi, -1.0, 1.0).unwrap_or_else(|| {
            debug!(
                latitude,
                longitude,
                fallback = NEUTRAL_NDVI,
                "NDVI unavailable, using default"
            );
            NEUTRAL_NDVI
        });

        let features = WaypointFeatures {
            latitude,
            longitude,
            elevation,
            relative_elevation: finite(terrain.relative_elevation).or_else(|| {
                Self::relative_elevation(elevation, &terrain.neighbor_elevations)
            }),
            slope: slope.clamp(0.0, 90.0),
            aspect: finite(terrain.aspect).map(|a| a.rem_euclid(360.0)),
            water_distance,
            has_confluence: raw.hydrography.has_confluence,
            has_meander: raw.hydrography.has_meander,
            is_riparian: raw.hydrography.is_riparian,
            water_type: raw
                .hydrography
                .water_type
                .as_deref()
                .and_then(parse_water_label),
            ndvi,
            stand_type,
            is_transition,
            adjacent_stands,
            cover_density: finite(vegetation.canopy_cover).map(cover_from_canopy),
            thermal: raw.thermal,
            corridor: raw.corridor.map(|mut corridor| {
                corridor.connectivity = corridor.connectivity.clamp(0.0, 1.0);
                corridor
            }),
            feeding_zone: raw.feeding_zone.map(|mut zone| {
                zone.density = zone.density.clamp(0.0, 1.0);
                zone
            }),
            resting_zone: raw.resting_zone,
            visibility: clamp_index(raw.visibility, 0.0, 100.0),
            human_pressure: clamp_index(raw.human_pressure, 0.0, 100.0),
            structure_score: clamp_index(vegetation.structure_score, 0.0, 100.0),
            season: raw.season,
            context: raw.context.clone(),
        };
        features.validate()?;
        Ok(features)
    }
}
