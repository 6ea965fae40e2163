//! Sun and Moon positions for an observer.
//!
//! Equatorial coordinates come from `practical_astronomy_rust`; this module only
//! turns them into degrees and horizon coordinates. Times are handed to the crate
//! as UTC civil time (no daylight saving, zone correction 0).

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use practical_astronomy_rust::{moon as pa_moon, sun as pa_sun};

use crate::angles::{
    altitude, azimuth, deg_to_rad, hour_angle, julian_date, local_sidereal_time,
};
use crate::types::{BodyPosition, MoonIllumination, MoonPosition, ObserverLocation};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoords {
    pub right_ascension: f64,
    pub declination: f64,
    pub distance_km: f64,
}

pub fn hms_to_degrees(h: f64, m: f64, s: f64) -> f64 {
    (h + m / 60.0 + s / 3600.0) * 15.0
}

pub fn dms_to_degrees(d: f64, m: f64, s: f64) -> f64 {
    let negative = d.is_sign_negative() || m < 0.0 || s < 0.0;
    let value = d.abs() + m.abs() / 60.0 + s.abs() / 3600.0;
    if negative {
        -value
    } else {
        value
    }
}

struct CivilTime {
    hour: f64,
    minute: f64,
    second: f64,
    day: f64,
    month: u32,
    year: u32,
}

fn civil_time<Tz: TimeZone>(instant: &DateTime<Tz>) -> CivilTime {
    let t = instant.with_timezone(&Utc);
    CivilTime {
        hour: t.hour() as f64,
        minute: t.minute() as f64,
        second: t.second() as f64 + t.timestamp_subsec_micros() as f64 / 1.0e6,
        day: t.day() as f64,
        month: t.month(),
        year: t.year() as u32,
    }
}

pub fn sun_coords<Tz: TimeZone>(instant: &DateTime<Tz>) -> EquatorialCoords {
    let c = civil_time(instant);
    let (ra_h, ra_m, ra_s, dec_d, dec_m, dec_s) =
        pa_sun::precise_position_of_sun(c.hour, c.minute, c.second, c.day, c.month, c.year, false, 0);
    let (distance_km, _, _, _) =
        pa_sun::sun_distance_and_angular_size(c.hour, c.minute, c.second, c.day, c.month, c.year, false, 0);
    EquatorialCoords {
        right_ascension: hms_to_degrees(ra_h, ra_m, ra_s),
        declination: dms_to_degrees(dec_d, dec_m, dec_s),
        distance_km,
    }
}

pub fn moon_coords<Tz: TimeZone>(instant: &DateTime<Tz>) -> EquatorialCoords {
    let c = civil_time(instant);
    let (ra_h, ra_m, ra_s, dec_d, dec_m, dec_s, _, _) =
        pa_moon::precise_position_of_moon(c.hour, c.minute, c.second, false, 0, c.day, c.month, c.year);
    let (distance_km, _, _, _, _, _) =
        pa_moon::moon_dist_ang_diam_hor_parallax(c.hour, c.minute, c.second, false, 0, c.day, c.month, c.year);
    EquatorialCoords {
        right_ascension: hms_to_degrees(ra_h, ra_m, ra_s),
        declination: dms_to_degrees(dec_d, dec_m, dec_s),
        distance_km,
    }
}

fn horizon<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    observer: &ObserverLocation,
    coords: &EquatorialCoords,
) -> BodyPosition {
    let lst = local_sidereal_time(julian_date(instant), observer.longitude);
    let ha = hour_angle(lst, coords.right_ascension);
    BodyPosition {
        altitude: altitude(coords.declination, observer.latitude, ha),
        azimuth: azimuth(coords.declination, observer.latitude, ha),
    }
}

pub fn sun_position<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    observer: &ObserverLocation,
) -> BodyPosition {
    horizon(instant, observer, &sun_coords(instant))
}

pub fn moon_position<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    observer: &ObserverLocation,
) -> MoonPosition {
    let coords = moon_coords(instant);
    let pos = horizon(instant, observer, &coords);
    MoonPosition {
        altitude: pos.altitude,
        azimuth: pos.azimuth,
        distance_km: coords.distance_km,
    }
}

/// Illuminated fraction from the Sun-Moon elongation. Phase runs 0 (new) through
/// 0.5 (full) back to 1.
pub fn moon_illumination<Tz: TimeZone>(instant: &DateTime<Tz>) -> MoonIllumination {
    let s = sun_coords(instant);
    let m = moon_coords(instant);

    let (s_ra, s_dec) = (deg_to_rad(s.right_ascension), deg_to_rad(s.declination));
    let (m_ra, m_dec) = (deg_to_rad(m.right_ascension), deg_to_rad(m.declination));
    let d_ra = m_ra - s_ra;

    let elongation = (s_dec.sin() * m_dec.sin() + s_dec.cos() * m_dec.cos() * d_ra.cos())
        .clamp(-1.0, 1.0)
        .acos();
    let phase_angle =
        (s.distance_km * elongation.sin()).atan2(m.distance_km - s.distance_km * elongation.cos());
    let waxing = d_ra.sin() > 0.0;
    let progress = (PI - phase_angle) / (2.0 * PI);

    MoonIllumination {
        fraction: (1.0 + phase_angle.cos()) / 2.0,
        phase: if waxing { progress } else { 1.0 - progress },
    }
}
