use chrono::NaiveDate;
use chrono_tz::America::Chicago;

use night_sky_visibility::{
    calculate_object_visibility, sky_bands, summarize, ObserverLocation, Target, VisibilityConfig,
};

fn main() {
    let observer = ObserverLocation {
        latitude: 39.8,
        longitude: -89.6,
    };
    // Orion Nebula
    let target = Target {
        right_ascension: 83.82,
        declination: -5.39,
        name: Some("M42".to_string()),
    };
    let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

    let samples =
        calculate_object_visibility(date, &Chicago, &observer, &target, &VisibilityConfig::default())
            .unwrap();

    println!("=== Visibility Example ===");
    println!(
        "Location: Springfield, IL ({:.1}°N, {:.1}°W)",
        observer.latitude, -observer.longitude
    );
    println!("Target: {} (RA {:.2}°, Dec {:.2}°)", target.display_name(), target.right_ascension, target.declination);
    println!();
    for s in &samples {
        println!(
            "{} {} alt {:>6.1}°  sun {:>6.1}°  moon {:>6.1}°  airmass {}",
            s.time,
            s.condition().marker(),
            s.altitude,
            s.sun_altitude,
            s.moon_altitude,
            s.airmass.map_or("-".to_string(), |a| format!("{:.2}", a)),
        );
    }
    println!();
    for band in sky_bands(&samples) {
        println!("{:?}: {} - {}", band.condition, band.start, band.end.as_deref().unwrap_or("end"));
    }
    let summary = summarize(&samples, 30.0);
    println!("Dark hours above 30°: {:.0}", summary.dark_hours_above_minimum);
}
