use chrono::NaiveDate;
use chrono_tz::America::Chicago;

use night_sky_visibility::render::*;
use night_sky_visibility::types::*;
use night_sky_visibility::visibility::{calculate_object_visibility, sky_bands, summarize};

struct Fixture {
    target: Target,
    observer: ObserverLocation,
    samples: Vec<VisibilitySample>,
    bands: Vec<SkyBand>,
    summary: VisibilitySummary,
}

fn fixture() -> Fixture {
    let target = Target {
        right_ascension: 83.82,
        declination: -5.39,
        name: Some("M42".to_string()),
    };
    let observer = ObserverLocation {
        latitude: 39.8,
        longitude: -89.6,
    };
    let samples = calculate_object_visibility(
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        &Chicago,
        &observer,
        &target,
        &VisibilityConfig::default(),
    )
    .unwrap();
    let bands = sky_bands(&samples);
    let summary = summarize(&samples, 30.0);
    Fixture {
        target,
        observer,
        samples,
        bands,
        summary,
    }
}

fn report(f: &Fixture) -> VisibilityReport<'_> {
    VisibilityReport {
        target_name: f.target.display_name(),
        target: &f.target,
        observer: &f.observer,
        date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        timezone: "America/Chicago".to_string(),
        samples: &f.samples,
        bands: &f.bands,
        summary: &f.summary,
    }
}

#[test]
fn test_output_format_from_str() {
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
    assert_eq!(OutputFormat::default(), OutputFormat::Table);
    assert!("svg".parse::<OutputFormat>().is_err());
}

#[test]
fn test_csv_has_header_and_one_row_per_sample() {
    let f = fixture();
    let csv = render(&report(&f), OutputFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 25);
    assert!(lines[0].starts_with("time,timestamp,altitude"));
    assert!(lines[1].starts_with("12:00,2026-01-14T18:00:00+00:00,"));
    for line in &lines[1..] {
        assert_eq!(line.split(',').count(), 9, "{}", line);
    }
}

#[test]
fn test_json_uses_chart_field_names() {
    let f = fixture();
    let json = render(&report(&f), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["targetName"], "M42");
    let samples = value["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 24);
    for key in ["time", "altitude", "sunAltitude", "moonAltitude", "airmass", "isNight", "isTwilight", "moonIllumination"] {
        assert!(samples[0].get(key).is_some(), "missing {}", key);
    }
    assert_eq!(value["bands"].as_array().unwrap().len(), 3);
    assert_eq!(value["bands"][1]["condition"], "night");
}

#[test]
fn test_json_airmass_null_below_horizon() {
    let f = fixture();
    let json = render(&report(&f), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for (sample, raw) in value["samples"].as_array().unwrap().iter().zip(&f.samples) {
        assert_eq!(sample["airmass"].is_null(), raw.altitude <= 0.0);
    }
}

#[test]
fn test_table_lists_samples_bands_and_summary() {
    let f = fixture();
    let table = render(&report(&f), OutputFormat::Table).unwrap();
    assert!(table.contains("Night Sky Visibility: M42"));
    assert!(table.contains("--- Sky bands ---"));
    assert!(table.contains("Night: 19:00 - 06:00"));
    assert!(table.contains("--- Summary ---"));
    assert!(table.lines().any(|l| l.starts_with("00:00") && l.contains('*')));
}
