use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_LABEL: &str = "Object Altitude";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub right_ascension: f64,
    pub declination: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Target {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => DEFAULT_TARGET_LABEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkyCondition {
    Day,
    Twilight,
    Night,
}

impl SkyCondition {
    pub fn marker(self) -> char {
        match self {
            SkyCondition::Day => '.',
            SkyCondition::Twilight => '~',
            SkyCondition::Night => '*',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    pub altitude: f64,
    pub azimuth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    pub altitude: f64,
    pub azimuth: f64,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonIllumination {
    pub fraction: f64,
    pub phase: f64,
}

/// One hourly point of the visibility profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilitySample {
    pub time: String,
    pub timestamp: DateTime<Utc>,
    pub altitude: f64,
    pub sun_altitude: f64,
    pub moon_altitude: f64,
    pub airmass: Option<f64>,
    pub is_night: bool,
    pub is_twilight: bool,
    pub moon_illumination: f64,
}

impl VisibilitySample {
    pub fn condition(&self) -> SkyCondition {
        if self.is_night {
            SkyCondition::Night
        } else if self.is_twilight {
            SkyCondition::Twilight
        } else {
            SkyCondition::Day
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleWindow {
    #[serde(rename = "midnight", alias = "midnight-to-midnight")]
    MidnightToMidnight,
    #[default]
    #[serde(rename = "noon", alias = "noon-to-noon")]
    NoonToNoon,
}

impl fmt::Display for SampleWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleWindow::MidnightToMidnight => f.write_str("midnight"),
            SampleWindow::NoonToNoon => f.write_str("noon"),
        }
    }
}

impl FromStr for SampleWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "midnight" | "midnight-to-midnight" => Ok(SampleWindow::MidnightToMidnight),
            "noon" | "noon-to-noon" => Ok(SampleWindow::NoonToNoon),
            other => Err(format!("unknown sample window '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityConfig {
    pub window: SampleWindow,
    pub samples: usize,
    pub step_minutes: i64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            window: SampleWindow::NoonToNoon,
            samples: 24,
            step_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkyBand {
    pub condition: SkyCondition,
    pub start: String,
    pub end: Option<String>,
    pub first_index: usize,
    pub last_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilitySummary {
    pub best_dark_sample: Option<VisibilitySample>,
    pub dark_hours_above_minimum: f64,
    pub min_altitude: f64,
    pub mean_moon_illumination: f64,
}
