use chrono::{DateTime, TimeZone, Utc};

use crate::types::{ObserverLocation, Target};

pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const J2000: f64 = 2_451_545.0;
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const MS_PER_DAY: f64 = 86_400_000.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn hours_to_degrees(hours: f64) -> f64 {
    hours * DEGREES_PER_HOUR
}

pub fn julian_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    let utc = instant.with_timezone(&Utc);
    utc.timestamp_millis() as f64 / MS_PER_DAY + UNIX_EPOCH_JD
}

pub fn days_since_j2000<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    julian_date(instant) - J2000
}

pub fn local_sidereal_time(jd: f64, longitude: f64) -> f64 {
    normalize_angle(280.46061837 + 360.98564736629 * (jd - J2000) + longitude)
}

pub fn hour_angle(local_sidereal_time: f64, right_ascension: f64) -> f64 {
    normalize_angle(local_sidereal_time - right_ascension + 360.0)
}

pub fn altitude(declination: f64, latitude: f64, hour_angle: f64) -> f64 {
    let dec_rad = deg_to_rad(declination);
    let lat_rad = deg_to_rad(latitude);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_alt = dec_rad.sin() * lat_rad.sin() + dec_rad.cos() * lat_rad.cos() * ha_rad.cos();
    rad_to_deg(sin_alt.clamp(-1.0, 1.0).asin())
}

pub fn zenith_angle(altitude: f64) -> f64 {
    90.0 - altitude
}

pub fn azimuth(declination: f64, latitude: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_az = -dec_rad.cos() * ha_rad.sin();
    let cos_az = dec_rad.sin() * lat_rad.cos() - dec_rad.cos() * lat_rad.sin() * ha_rad.cos();
    normalize_angle(rad_to_deg(sin_az.atan2(cos_az)))
}

/// Kasten & Young (1989). Only defined for a target above the horizon.
pub fn airmass(altitude: f64) -> Option<f64> {
    if altitude.is_nan() || altitude <= 0.0 {
        return None;
    }
    let alt = altitude.min(90.0);
    Some(1.0 / (deg_to_rad(alt).sin() + 0.50572 * (alt + 6.07995).powf(-1.6364)))
}

pub fn target_altitude_at<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    observer: &ObserverLocation,
    target: &Target,
) -> f64 {
    let lst = local_sidereal_time(julian_date(instant), observer.longitude);
    let ha = hour_angle(lst, target.right_ascension);
    altitude(target.declination, observer.latitude, ha)
}
