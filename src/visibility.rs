use std::fmt::Display;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use tracing::{debug, info};

use crate::angles;
use crate::ephemeris;
use crate::error::{Result, VisibilityError};
use crate::types::{
    ObserverLocation, SampleWindow, SkyBand, SkyCondition, Target, VisibilityConfig,
    VisibilitySample, VisibilitySummary,
};

pub const ASTRONOMICAL_TWILIGHT: f64 = -18.0;
pub const HORIZON: f64 = 0.0;

pub fn sky_condition(sun_altitude: f64) -> SkyCondition {
    if sun_altitude < ASTRONOMICAL_TWILIGHT {
        SkyCondition::Night
    } else if sun_altitude < HORIZON {
        SkyCondition::Twilight
    } else {
        SkyCondition::Day
    }
}

pub fn time_label<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format("%H:%M").to_string()
}

pub fn window_start<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
    window: SampleWindow,
) -> Result<DateTime<Utc>> {
    let local = match window {
        SampleWindow::MidnightToMidnight => date.and_time(NaiveTime::MIN),
        SampleWindow::NoonToNoon => {
            let previous = date
                .pred_opt()
                .ok_or_else(|| VisibilityError::InvalidLocalTime(format!("{} 12:00", date)))?;
            previous.and_time(NaiveTime::MIN) + Duration::hours(12)
        }
    };
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| VisibilityError::InvalidLocalTime(local.to_string()))
}

/// Instant of sample `n`, or `None` when the offset leaves chrono's range.
fn sample_instant(start: DateTime<Utc>, step_minutes: i64, n: usize) -> Option<DateTime<Utc>> {
    let minutes = step_minutes.checked_mul(i64::try_from(n).ok()?)?;
    start.checked_add_signed(TimeDelta::try_minutes(minutes)?)
}

fn sample_at<Tz: TimeZone>(
    instant: DateTime<Utc>,
    tz: &Tz,
    observer: &ObserverLocation,
    target: &Target,
) -> VisibilitySample
where
    Tz::Offset: Display,
{
    let altitude = angles::target_altitude_at(&instant, observer, target);
    let sun = ephemeris::sun_position(&instant, observer);
    let moon = ephemeris::moon_position(&instant, observer);
    let illumination = ephemeris::moon_illumination(&instant);
    let condition = sky_condition(sun.altitude);

    VisibilitySample {
        time: time_label(&instant.with_timezone(tz)),
        timestamp: instant,
        altitude,
        sun_altitude: sun.altitude,
        moon_altitude: moon.altitude,
        airmass: angles::airmass(altitude),
        is_night: condition == SkyCondition::Night,
        is_twilight: condition == SkyCondition::Twilight,
        moon_illumination: illumination.fraction,
    }
}

pub fn calculate_object_visibility<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
    observer: &ObserverLocation,
    target: &Target,
    config: &VisibilityConfig,
) -> Result<Vec<VisibilitySample>>
where
    Tz::Offset: Display,
{
    if config.samples == 0 {
        return Err(VisibilityError::EmptyWindow);
    }
    if config.step_minutes <= 0 {
        return Err(VisibilityError::InvalidStep(config.step_minutes));
    }

    let start = window_start(date, tz, config.window)?;
    let out_of_range = || VisibilityError::WindowOutOfRange {
        samples: config.samples,
        step_minutes: config.step_minutes,
    };
    // largest offset; every earlier one fits if this one does
    sample_instant(start, config.step_minutes, config.samples - 1).ok_or_else(out_of_range)?;
    info!(
        %date,
        window = %config.window,
        target = target.display_name(),
        %start,
        "computing visibility"
    );

    let samples = (0..config.samples)
        .map(|n| {
            let instant = sample_instant(start, config.step_minutes, n).ok_or_else(out_of_range)?;
            Ok(sample_at(instant, tz, observer, target))
        })
        .collect::<Result<Vec<VisibilitySample>>>()?;

    debug!(
        samples = samples.len(),
        night = samples.iter().filter(|s| s.is_night).count(),
        twilight = samples.iter().filter(|s| s.is_twilight).count(),
        "visibility samples ready"
    );
    Ok(samples)
}

/// Contiguous runs of twilight or night samples, in window order.
pub fn sky_bands(samples: &[VisibilitySample]) -> Vec<SkyBand> {
    let mut bands: Vec<SkyBand> = Vec::new();
    for (index, sample) in samples.iter().enumerate() {
        let condition = sample.condition();
        if condition == SkyCondition::Day {
            continue;
        }
        match bands.last_mut() {
            Some(band) if band.condition == condition && band.last_index + 1 == index => {
                band.last_index = index;
            }
            _ => bands.push(SkyBand {
                condition,
                start: sample.time.clone(),
                end: None,
                first_index: index,
                last_index: index,
            }),
        }
    }
    for band in &mut bands {
        band.end = samples.get(band.last_index + 1).map(|s| s.time.clone());
    }
    bands
}

pub fn summarize(samples: &[VisibilitySample], min_altitude: f64) -> VisibilitySummary {
    let step_hours = match samples {
        [first, second, ..] => (second.timestamp - first.timestamp).num_minutes() as f64 / 60.0,
        _ => 1.0,
    };

    let dark = samples.iter().filter(|s| s.is_night || s.is_twilight);
    let best_dark_sample = dark
        .clone()
        .max_by(|a, b| a.altitude.total_cmp(&b.altitude))
        .cloned();
    let dark_hours_above_minimum =
        dark.filter(|s| s.altitude >= min_altitude).count() as f64 * step_hours;

    let mean_moon_illumination = if samples.is_empty() {
        0.0
    } else {
        samples.iter().map(|s| s.moon_illumination).sum::<f64>() / samples.len() as f64
    };

    VisibilitySummary {
        best_dark_sample,
        dark_hours_above_minimum,
        min_altitude,
        mean_moon_illumination,
    }
}
