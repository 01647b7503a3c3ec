// ABOUTME: Seasonal product recommendations placed relative to the wind
// ABOUTME: Rut attractant and summer mineral block, gated on sub-scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, FixedOffset};

use bionic_core::models::{
    ProductCategory, ProductRecommendation, Season, SubScores, WeatherSnapshot,
};

use super::{normalize_bearing, wind_bearing};
use crate::calendar::{is_rut_period, season_for};

/// Minimum affuts sub-score for an attractant
const ATTRACTANT_MIN_AFFUTS: f64 = 60.0;
/// Minimum salines sub-score for a mineral block
const MINERAL_MIN_SALINES: f64 = 50.0;

/// Products worth placing at the waypoint now
#[must_use]
pub fn recommend_products(
    scores: &SubScores,
    weather: Option<&WeatherSnapshot>,
    now: DateTime<FixedOffset>,
) -> Vec<ProductRecommendation> {
    let wind = wind_bearing(weather);
    let mut products = Vec::new();

    if is_rut_period(&now) && scores.affuts >= ATTRACTANT_MIN_AFFUTS {
        products.push(ProductRecommendation {
            product_id: "rut-urine-attractant".to_owned(),
            name: "Urine-based rut attractant".to_owned(),
            category: ProductCategory::Attractant,
            quantity: "50 ml".to_owned(),
            frequency: "every 2 days".to_owned(),
            placement_offset_meters: 30,
            placement_direction: normalize_bearing(wind + 90.0).round() as u16 % 360,
            reason: format!(
                "Rut period with affuts score {:.0}, place crosswind of the stand",
                scores.affuts
            ),
        });
    }

    if season_for(&now) == Season::Summer && scores.salines >= MINERAL_MIN_SALINES {
        products.push(ProductRecommendation {
            product_id: "mineral-block".to_owned(),
            name: "Mineral salt block".to_owned(),
            category: ProductCategory::Mineral,
            quantity: "5 kg".to_owned(),
            frequency: "every 60 days".to_owned(),
            placement_offset_meters: 50,
            placement_direction: normalize_bearing(wind).round() as u16 % 360,
            reason: format!(
                "Summer mineral demand with salines score {:.0}, place upwind",
                scores.salines
            ),
        });
    }

    products
}
