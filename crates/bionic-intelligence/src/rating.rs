// ABOUTME: Rating classification of a final score against descending thresholds
// ABOUTME: Maps each bucket to its display label and color
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use bionic_core::models::{Rating, RatingLevel};

use crate::config::Thresholds;

/// Bucket a score; lower bounds are inclusive, below `low` is poor
#[must_use]
pub fn classify(score: f64, thresholds: &Thresholds) -> RatingLevel {
    [
        (thresholds.excellent, RatingLevel::Excellent),
        (thresholds.good, RatingLevel::Good),
        (thresholds.moderate, RatingLevel::Moderate),
        (thresholds.low, RatingLevel::Low),
    ]
    .into_iter()
    .find(|(min, _)| score >= *min)
    .map_or(RatingLevel::Poor, |(_, level)| level)
}

/// Display label and hex color of a bucket
#[must_use]
pub const fn presentation(level: RatingLevel) -> (&'static str, &'static str) {
    match level {
        RatingLevel::Excellent => ("Excellent", "#1b7f3b"),
        RatingLevel::Good => ("Good", "#5cb85c"),
        RatingLevel::Moderate => ("Moderate", "#f0ad4e"),
        RatingLevel::Low => ("Low", "#e8743b"),
        RatingLevel::Poor => ("Poor", "#d9534f"),
    }
}

/// Full rating of a score
#[must_use]
pub fn rate(score: f64, thresholds: &Thresholds) -> Rating {
    let level = classify(score, thresholds);
    let (label, color) = presentation(level);
    Rating {
        level,
        label: label.to_owned(),
        color: color.to_owned(),
    }
}
