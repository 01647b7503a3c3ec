// ABOUTME: Fixed map-layer style contract consumed by the territory map renderer
// ABOUTME: Maps each of the 15 layers to color, opacity and icon by score bucket or category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};

/// Map layers rendered over a territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapLayer {
    /// Composite score heatmap
    BionicScore,
    /// Habitat sub-score
    Habitat,
    /// Rut sub-score
    Rut,
    /// Salines sub-score
    Salines,
    /// Affuts sub-score
    Affuts,
    /// Trajets sub-score
    Trajets,
    /// Peuplements sub-score
    Peuplements,
    /// Water features
    Water,
    /// Travel corridors
    Corridors,
    /// Feeding zones
    FeedingZones,
    /// Resting zones
    RestingZones,
    /// Human pressure
    HumanPressure,
    /// Thermal flows
    Thermals,
    /// Stand classification
    StandTypes,
    /// Elevation shading
    Elevation,
}

impl MapLayer {
    /// All layers in rendering order
    pub const ALL: [Self; 15] = [
        Self::BionicScore,
        Self::Habitat,
        Self::Rut,
        Self::Salines,
        Self::Affuts,
        Self::Trajets,
        Self::Peuplements,
        Self::Water,
        Self::Corridors,
        Self::FeedingZones,
        Self::RestingZones,
        Self::HumanPressure,
        Self::Thermals,
        Self::StandTypes,
        Self::Elevation,
    ];

    /// Whether the layer is colored by a score rather than a fixed style
    #[must_use]
    pub const fn is_score_layer(self) -> bool {
        matches!(
            self,
            Self::BionicScore
                | Self::Habitat
                | Self::Rut
                | Self::Salines
                | Self::Affuts
                | Self::Trajets
                | Self::Peuplements
        )
    }

    const fn icon(self) -> &'static str {
        match self {
            Self::BionicScore => "target",
            Self::Habitat => "tree",
            Self::Rut => "deer",
            Self::Salines => "salt",
            Self::Affuts => "tower",
            Self::Trajets => "footprints",
            Self::Peuplements => "forest",
            Self::Water => "droplet",
            Self::Corridors => "route",
            Self::FeedingZones => "acorn",
            Self::RestingZones => "bed",
            Self::HumanPressure => "user",
            Self::Thermals => "wind",
            Self::StandTypes => "layers",
            Self::Elevation => "mountain",
        }
    }
}

/// Rendering style of a layer feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerStyle {
    /// Hex color
    pub color: &'static str,
    /// Fill opacity in [0,1]
    pub opacity: f64,
    /// Icon name
    pub icon: &'static str,
}

/// Color and opacity of a score bucket, boundaries 85/70/50/30
fn score_bucket(score: f64) -> (&'static str, f64) {
    if score >= 85.0 {
        ("#1b7f3b", 0.85)
    } else if score >= 70.0 {
        ("#5cb85c", 0.75)
    } else if score >= 50.0 {
        ("#f0ad4e", 0.65)
    } else if score >= 30.0 {
        ("#e8743b", 0.55)
    } else {
        ("#d9534f", 0.45)
    }
}

/// Fixed color and opacity of a category layer
const fn category_style(layer: MapLayer) -> (&'static str, f64) {
    match layer {
        MapLayer::Water => ("#2b8cbe", 0.7),
        MapLayer::Corridors => ("#8c510a", 0.8),
        MapLayer::FeedingZones => ("#d8b365", 0.6),
        MapLayer::RestingZones => ("#5ab4ac", 0.6),
        MapLayer::HumanPressure => ("#b2182b", 0.5),
        MapLayer::Thermals => ("#f4a582", 0.5),
        MapLayer::StandTypes => ("#4d9221", 0.55),
        MapLayer::Elevation => ("#8073ac", 0.4),
        _ => ("#999999", 0.5),
    }
}

/// Style of a layer feature
///
/// Score layers are styled by the bucket of `score`; a missing score renders
/// in the lowest bucket. Category layers ignore `score`.
#[must_use]
pub fn layer_style(layer: MapLayer, score: Option<f64>) -> LayerStyle {
    let (color, opacity) = if layer.is_score_layer() {
        score_bucket(score.unwrap_or(0.0))
    } else {
        category_style(layer)
    };
    LayerStyle {
        color,
        opacity,
        icon: layer.icon(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifteen_layers() {
        assert_eq!(MapLayer::ALL.len(), 15);
        assert_eq!(
            MapLayer::ALL.iter().filter(|l| l.is_score_layer()).count(),
            7
        );
    }

    #[test]
    fn test_score_layer_buckets() {
        assert_eq!(layer_style(MapLayer::Habitat, Some(90.0)).color, "#1b7f3b");
        assert_eq!(layer_style(MapLayer::Habitat, Some(85.0)).color, "#1b7f3b");
        assert_eq!(layer_style(MapLayer::Habitat, Some(84.9)).color, "#5cb85c");
        assert_eq!(layer_style(MapLayer::Rut, Some(10.0)).color, "#d9534f");
    }

    #[test]
    fn test_category_layer_ignores_score() {
        assert_eq!(
            layer_style(MapLayer::Water, Some(10.0)),
            layer_style(MapLayer::Water, Some(95.0))
        );
    }
}
