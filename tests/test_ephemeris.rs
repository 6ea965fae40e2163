use chrono::{Duration, TimeZone, Utc};

use night_sky_visibility::ephemeris::*;
use night_sky_visibility::types::ObserverLocation;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn springfield() -> ObserverLocation {
    ObserverLocation {
        latitude: 39.8,
        longitude: -89.6,
    }
}

fn null_island() -> ObserverLocation {
    ObserverLocation {
        latitude: 0.0,
        longitude: 0.0,
    }
}

// ── Sun ──

#[test]
fn test_sun_high_at_equinox_noon_on_equator() {
    let t = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
    let pos = sun_position(&t, &null_island());
    assert!(pos.altitude > 85.0, "altitude={}", pos.altitude);
}

#[test]
fn test_sun_low_at_equinox_midnight_on_equator() {
    let t = Utc.with_ymd_and_hms(2026, 3, 20, 0, 0, 0).unwrap();
    let pos = sun_position(&t, &null_island());
    assert!(pos.altitude < -80.0, "altitude={}", pos.altitude);
}

#[test]
fn test_springfield_summer_solstice_noon() {
    // local solar noon is close to 18:00 UTC at 89.6°W
    let t = Utc.with_ymd_and_hms(2026, 6, 21, 18, 0, 0).unwrap();
    let pos = sun_position(&t, &springfield());
    assert_approx!(pos.altitude, 90.0 - 39.8 + 23.44, 1.0);
    assert_approx!(pos.azimuth, 180.0, 10.0);
}

#[test]
fn test_springfield_winter_solstice_noon() {
    let t = Utc.with_ymd_and_hms(2026, 12, 21, 18, 0, 0).unwrap();
    let pos = sun_position(&t, &springfield());
    assert_approx!(pos.altitude, 90.0 - 39.8 - 23.44, 1.0);
}

#[test]
fn test_sun_rises_in_east_sets_in_west() {
    let observer = springfield();
    let morning = Utc.with_ymd_and_hms(2026, 3, 21, 13, 0, 0).unwrap();
    let evening = Utc.with_ymd_and_hms(2026, 3, 21, 23, 0, 0).unwrap();
    let am = sun_position(&morning, &observer);
    let pm = sun_position(&evening, &observer);
    assert!(am.azimuth > 0.0 && am.azimuth < 180.0, "am azimuth={}", am.azimuth);
    assert!(pm.azimuth > 180.0 && pm.azimuth < 360.0, "pm azimuth={}", pm.azimuth);
}

// ── Moon ──

#[test]
fn test_moon_position_bounds_over_a_month() {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    for h in (0..24 * 30).step_by(7) {
        let t = start + Duration::hours(h);
        let pos = moon_position(&t, &springfield());
        assert!(pos.altitude >= -90.0 && pos.altitude <= 91.0, "altitude={}", pos.altitude);
        assert!((0.0..360.0).contains(&pos.azimuth), "azimuth={}", pos.azimuth);
        assert!(pos.distance_km > 356_000.0 && pos.distance_km < 407_000.0);
    }
}

// ── Illumination ──

#[test]
fn test_full_moon_at_march_2026_lunar_eclipse() {
    let t = Utc.with_ymd_and_hms(2026, 3, 3, 11, 30, 0).unwrap();
    let illum = moon_illumination(&t);
    assert!(illum.fraction > 0.97, "fraction={}", illum.fraction);
    assert_approx!(illum.phase, 0.5, 0.03);
}

#[test]
fn test_new_moon_at_february_2026_solar_eclipse() {
    let t = Utc.with_ymd_and_hms(2026, 2, 17, 12, 0, 0).unwrap();
    let illum = moon_illumination(&t);
    assert!(illum.fraction < 0.03, "fraction={}", illum.fraction);
}

#[test]
fn test_illumination_waxes_after_new_moon() {
    let new_moon = Utc.with_ymd_and_hms(2026, 8, 12, 18, 0, 0).unwrap();
    let mut previous = moon_illumination(&new_moon).fraction;
    for day in 1..=12 {
        let f = moon_illumination(&(new_moon + Duration::days(day))).fraction;
        assert!(f > previous, "day {}: {} <= {}", day, f, previous);
        assert!((0.0..=1.0).contains(&f));
        previous = f;
    }
}
