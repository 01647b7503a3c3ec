// ABOUTME: Canonical waypoint feature record consumed by the scoring engine
// ABOUTME: Stand, water, cover and zone enums plus required-field validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Forest or vegetation community at a waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StandType {
    /// Oak-dominated stand
    Oak,
    /// Beech-dominated stand
    Beech,
    /// Other broadleaf stand
    Hardwood,
    /// Mixed broadleaf and conifer
    Mixed,
    /// Conifer plantation or forest
    Conifer,
    /// Young regrowth after felling
    Regeneration,
    /// Coppice and coppice-with-standards
    Coppice,
    /// Wet woodland and marsh
    Wetland,
    /// Open grassland
    Meadow,
    /// Arable land
    Cropland,
    /// Unclassified
    #[default]
    Unknown,
}

impl StandType {
    /// Every classified stand type, excluding `Unknown`
    pub const CLASSIFIED: [Self; 10] = [
        Self::Oak,
        Self::Beech,
        Self::Hardwood,
        Self::Mixed,
        Self::Conifer,
        Self::Regeneration,
        Self::Coppice,
        Self::Wetland,
        Self::Meadow,
        Self::Cropland,
    ];

    /// Stable identifier used in config keys and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oak => "oak",
            Self::Beech => "beech",
            Self::Hardwood => "hardwood",
            Self::Mixed => "mixed",
            Self::Conifer => "conifer",
            Self::Regeneration => "regeneration",
            Self::Coppice => "coppice",
            Self::Wetland => "wetland",
            Self::Meadow => "meadow",
            Self::Cropland => "cropland",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of the nearest water feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterType {
    /// Spring or seep
    Spring,
    /// Pond or wallow
    Pond,
    /// Stream or brook
    Stream,
    /// Marsh or bog
    Wetland,
    /// River
    River,
    /// Lake
    Lake,
}

/// Understorey cover density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverDensity {
    /// Open understorey
    Sparse,
    /// Partial cover
    Moderate,
    /// Thick cover
    Dense,
}

/// Dominant food resource of a feeding zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedingKind {
    /// Acorns, beechnuts, chestnuts
    Mast,
    /// Cereal or maize field
    Crop,
    /// Fruit trees
    Orchard,
    /// Shrubs and shoots
    Browse,
    /// Grass
    Meadow,
    /// Anything else
    Other,
}

/// Kind of trail near the waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailType {
    /// Trail worn by game
    Game,
    /// Forestry track
    Forestry,
    /// Footpath used by walkers
    Footpath,
    /// Paved or gravel road
    Road,
}

/// Meteorological season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// March to May
    Spring,
    /// June to August
    Summer,
    /// September to November
    Autumn,
    /// December to February
    Winter,
}

impl Season {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

/// Local thermal conditions measured or estimated at the waypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalConditions {
    /// Air temperature in degrees Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Whether the waypoint offers wind cover
    pub has_cover: bool,
}

/// Travel corridor and trail data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorridorData {
    /// Waypoint lies on an inferred corridor
    pub on_corridor: bool,
    /// Corridor width in metres
    #[serde(default)]
    pub width_meters: Option<f64>,
    /// Distance to the nearest trail in metres
    #[serde(default)]
    pub trail_distance: Option<f64>,
    /// Kind of the nearest trail
    #[serde(default)]
    pub trail_type: Option<TrailType>,
    /// Landscape connectivity in [0,1]
    pub connectivity: f64,
}

/// Nearest feeding zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedingZone {
    /// Distance in metres
    pub distance: f64,
    /// Resource density in [0,1]
    pub density: f64,
    /// Dominant resource
    pub kind: FeedingKind,
}

/// Nearest resting zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestingZone {
    /// Distance in metres
    pub distance: f64,
    /// Cover density of the zone
    pub cover_density: CoverDensity,
    /// An escape route leaves the zone
    #[serde(default)]
    pub has_escape_route: bool,
    /// The zone is screened from view
    #[serde(default)]
    pub has_visual_cover: bool,
    /// No regular human disturbance
    #[serde(default)]
    pub disturbance_free: bool,
}

/// Canonical feature record for one waypoint
///
/// Required numeric fields are checked by [`WaypointFeatures::validate`];
/// every optional block scores neutral when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointFeatures {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Elevation in metres
    pub elevation: f64,
    /// Elevation relative to the surrounding terrain in metres
    #[serde(default)]
    pub relative_elevation: Option<f64>,
    /// Slope in degrees
    pub slope: f64,
    /// Aspect in degrees clockwise from north, `None` when flat or unknown
    #[serde(default)]
    pub aspect: Option<f64>,
    /// Distance to the nearest water in metres
    pub water_distance: f64,
    /// Nearest water lies at a confluence
    #[serde(default)]
    pub has_confluence: bool,
    /// Nearest water meanders
    #[serde(default)]
    pub has_meander: bool,
    /// Waypoint lies in a riparian strip
    #[serde(default)]
    pub is_riparian: bool,
    /// Kind of the nearest water
    #[serde(default)]
    pub water_type: Option<WaterType>,
    /// Normalized difference vegetation index in [-1,1]
    pub ndvi: f64,
    /// Stand classification
    #[serde(default)]
    pub stand_type: StandType,
    /// Waypoint sits on an edge between stands
    #[serde(default)]
    pub is_transition: bool,
    /// Stand types bordering the waypoint
    #[serde(default)]
    pub adjacent_stands: Vec<StandType>,
    /// Understorey cover density
    #[serde(default)]
    pub cover_density: Option<CoverDensity>,
    /// Local thermal conditions
    #[serde(default)]
    pub thermal: Option<ThermalConditions>,
    /// Corridor and trail data
    #[serde(default)]
    pub corridor: Option<CorridorData>,
    /// Nearest feeding zone
    #[serde(default)]
    pub feeding_zone: Option<FeedingZone>,
    /// Nearest resting zone
    #[serde(default)]
    pub resting_zone: Option<RestingZone>,
    /// Field of view from the waypoint, 0-100
    #[serde(default)]
    pub visibility: Option<f64>,
    /// Human pressure, 0-100
    #[serde(default)]
    pub human_pressure: Option<f64>,
    /// Vertical structure of the vegetation, 0-100
    #[serde(default)]
    pub structure_score: Option<f64>,
    /// Season the features were observed in
    #[serde(default)]
    pub season: Option<Season>,
    /// Free-form context tag supplied by the caller
    #[serde(default)]
    pub context: Option<String>,
}

impl WaypointFeatures {
    /// Build a record from the required fields, leaving every optional block empty
    #[must_use]
    pub const fn new(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        slope: f64,
        water_distance: f64,
        ndvi: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
            relative_elevation: None,
            slope,
            aspect: None,
            water_distance,
            has_confluence: false,
            has_meander: false,
            is_riparian: false,
            water_type: None,
            ndvi,
            stand_type: StandType::Unknown,
            is_transition: false,
            adjacent_stands: Vec::new(),
            cover_density: None,
            thermal: None,
            corridor: None,
            feeding_zone: None,
            resting_zone: None,
            visibility: None,
            human_pressure: None,
            structure_score: None,
            season: None,
            context: None,
        }
    }

    /// Check required numeric fields and the ranges of optional ones
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-finite values and `ValueOutOfRange`
    /// when a field lies outside its admissible interval.
    pub fn validate(&self) -> AppResult<()> {
        check_range("latitude", self.latitude, -90.0, 90.0)?;
        check_range("longitude", self.longitude, -180.0, 180.0)?;
        check_finite("elevation", self.elevation)?;
        check_range("slope", self.slope, 0.0, 90.0)?;
        check_range("water_distance", self.water_distance, 0.0, f64::MAX)?;
        check_range("ndvi", self.ndvi, -1.0, 1.0)?;

        if let Some(relative) = self.relative_elevation {
            check_finite("relative_elevation", relative)?;
        }
        if let Some(aspect) = self.aspect {
            check_range("aspect", aspect, 0.0, 360.0)?;
        }
        for (field, value) in [
            ("visibility", self.visibility),
            ("human_pressure", self.human_pressure),
            ("structure_score", self.structure_score),
        ] {
            if let Some(value) = value {
                check_range(field, value, 0.0, 100.0)?;
            }
        }
        if let Some(corridor) = &self.corridor {
            check_range("corridor.connectivity", corridor.connectivity, 0.0, 1.0)?;
        }
        if let Some(feeding) = &self.feeding_zone {
            check_range("feeding_zone.distance", feeding.distance, 0.0, f64::MAX)?;
            check_range("feeding_zone.density", feeding.density, 0.0, 1.0)?;
        }
        if let Some(resting) = &self.resting_zone {
            check_range("resting_zone.distance", resting.distance, 0.0, f64::MAX)?;
        }
        if let Some(thermal) = &self.thermal {
            check_finite("thermal.temperature", thermal.temperature)?;
            check_range("thermal.wind_speed", thermal.wind_speed, 0.0, f64::MAX)?;
        }
        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "Field '{field}' must be a finite number"
        )))
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> AppResult<()> {
    check_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::out_of_range(field, value))
    }
}
