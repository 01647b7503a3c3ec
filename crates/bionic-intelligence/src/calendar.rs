// ABOUTME: Calendar helpers deriving season, time of day and moon phase from explicit timestamps
// ABOUTME: No wall-clock access so projections stay reproducible in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use bionic_core::models::Season;

/// Length of the simplified lunar cycle in days
const LUNAR_CYCLE_DAYS: i64 = 29;

/// Seconds from the Unix epoch to the reference new moon of 2000-01-06 18:14 UTC
const REFERENCE_NEW_MOON_UNIX: i64 = 947_182_440;

/// Part of the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// 05:00 to 09:00
    Dawn,
    /// 09:00 to 17:00
    Day,
    /// 17:00 to 21:00
    Dusk,
    /// 21:00 to 05:00
    Night,
}

/// Simplified moon phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    /// New moon
    New,
    /// Waxing
    Waxing,
    /// Full moon
    Full,
    /// Waning
    Waning,
}

impl TimeOfDay {
    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Day => "day",
            Self::Dusk => "dusk",
            Self::Night => "night",
        }
    }
}

impl MoonPhase {
    /// Wire label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Waxing => "waxing",
            Self::Full => "full",
            Self::Waning => "waning",
        }
    }
}

/// Season of a month number (1-12)
#[must_use]
pub const fn season_for_month(month: u32) -> Season {
    match month {
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        9..=11 => Season::Autumn,
        _ => Season::Winter,
    }
}

/// Season at a timestamp, in the timestamp's own zone
#[must_use]
pub fn season_for<Tz: TimeZone>(at: &DateTime<Tz>) -> Season {
    season_for_month(at.month())
}

/// Part of the day for an hour (0-23)
#[must_use]
pub const fn time_of_day_for_hour(hour: u32) -> TimeOfDay {
    match hour {
        5..=8 => TimeOfDay::Dawn,
        9..=16 => TimeOfDay::Day,
        17..=20 => TimeOfDay::Dusk,
        _ => TimeOfDay::Night,
    }
}

/// Part of the day at a timestamp, in the timestamp's own zone
#[must_use]
pub fn time_of_day_for<Tz: TimeZone>(at: &DateTime<Tz>) -> TimeOfDay {
    time_of_day_for_hour(at.hour())
}

/// Moon phase from whole days elapsed since the reference new moon
#[must_use]
pub fn moon_phase_for(at: &DateTime<Utc>) -> MoonPhase {
    let elapsed_days = (at.timestamp() - REFERENCE_NEW_MOON_UNIX).div_euclid(86_400);
    match elapsed_days.rem_euclid(LUNAR_CYCLE_DAYS) {
        0..=2 | 26.. => MoonPhase::New,
        3..=11 => MoonPhase::Waxing,
        12..=16 => MoonPhase::Full,
        _ => MoonPhase::Waning,
    }
}

/// Whether a month falls in the rut (September to November)
#[must_use]
pub const fn is_rut_month(month: u32) -> bool {
    matches!(month, 9..=11)
}

/// Whether a timestamp falls in the rut
#[must_use]
pub fn is_rut_period<Tz: TimeZone>(at: &DateTime<Tz>) -> bool {
    is_rut_month(at.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_seasons_by_month() {
        assert_eq!(season_for(&utc(2025, 3, 1, 0)), Season::Spring);
        assert_eq!(season_for(&utc(2025, 8, 31, 0)), Season::Summer);
        assert_eq!(season_for(&utc(2025, 10, 15, 0)), Season::Autumn);
        assert_eq!(season_for(&utc(2025, 12, 24, 0)), Season::Winter);
        assert_eq!(season_for(&utc(2025, 2, 1, 0)), Season::Winter);
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(time_of_day_for_hour(4), TimeOfDay::Night);
        assert_eq!(time_of_day_for_hour(5), TimeOfDay::Dawn);
        assert_eq!(time_of_day_for_hour(9), TimeOfDay::Day);
        assert_eq!(time_of_day_for_hour(17), TimeOfDay::Dusk);
        assert_eq!(time_of_day_for_hour(21), TimeOfDay::Night);
    }

    #[test]
    fn test_moon_phase_cycle() {
        assert_eq!(moon_phase_for(&utc(2000, 1, 7, 0)), MoonPhase::New);
        assert_eq!(moon_phase_for(&utc(2000, 1, 15, 0)), MoonPhase::Waxing);
        assert_eq!(moon_phase_for(&utc(2000, 1, 20, 20)), MoonPhase::Full);
        assert_eq!(moon_phase_for(&utc(2000, 1, 27, 20)), MoonPhase::Waning);
    }

    #[test]
    fn test_rut_period() {
        assert!(is_rut_period(&utc(2025, 10, 1, 0)));
        assert!(!is_rut_period(&utc(2025, 7, 1, 0)));
    }
}
