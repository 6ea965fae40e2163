use std::fmt::Write as _;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{ObserverLocation, SkyBand, Target, VisibilitySample, VisibilitySummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Everything a renderer needs for one request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityReport<'a> {
    pub target_name: &'a str,
    pub target: &'a Target,
    pub observer: &'a ObserverLocation,
    pub date: NaiveDate,
    pub timezone: String,
    pub samples: &'a [VisibilitySample],
    pub bands: &'a [SkyBand],
    pub summary: &'a VisibilitySummary,
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

pub fn render(report: &VisibilityReport<'_>, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Csv => Ok(render_csv(report.samples)),
    }
}

pub fn render_csv(samples: &[VisibilitySample]) -> String {
    let mut out = String::from(
        "time,timestamp,altitude,sun_altitude,moon_altitude,airmass,is_night,is_twilight,moon_illumination\n",
    );
    for s in samples {
        let _ = writeln!(
            out,
            "{},{},{:.3},{:.3},{:.3},{},{},{},{:.4}",
            s.time,
            s.timestamp.to_rfc3339(),
            s.altitude,
            s.sun_altitude,
            s.moon_altitude,
            s.airmass.map(|a| format!("{:.3}", a)).unwrap_or_default(),
            s.is_night,
            s.is_twilight,
            s.moon_illumination,
        );
    }
    out
}

pub fn render_table(report: &VisibilityReport<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Night Sky Visibility: {} ===", report.target_name);
    let _ = writeln!(
        out,
        "Observer: {:.4}°, {:.4}°   Date: {} ({})",
        report.observer.latitude, report.observer.longitude, report.date, report.timezone
    );
    let _ = writeln!(
        out,
        "Target:   RA {:.4}°  Dec {:+.4}°",
        report.target.right_ascension, report.target.declination
    );
    out.push('\n');
    let _ = writeln!(
        out,
        "{:<6} {:>3} {:>9} {:>9} {:>9} {:>8} {:>6}",
        "Time", "", "Altitude", "Sun", "Moon", "Airmass", "Illum"
    );
    for s in report.samples {
        let _ = writeln!(
            out,
            "{:<6} {:>3} {:>8.1}° {:>8.1}° {:>8.1}° {:>8} {:>5.0}%",
            s.time,
            s.condition().marker(),
            s.altitude,
            s.sun_altitude,
            s.moon_altitude,
            fmt_opt(s.airmass, 2),
            s.moon_illumination * 100.0,
        );
    }

    if !report.bands.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "--- Sky bands ---");
        for band in report.bands {
            let _ = writeln!(
                out,
                "{:?}: {} - {}",
                band.condition,
                band.start,
                band.end.as_deref().unwrap_or("end")
            );
        }
    }

    let summary = report.summary;
    out.push('\n');
    let _ = writeln!(out, "--- Summary ---");
    match &summary.best_dark_sample {
        Some(best) => {
            let _ = writeln!(
                out,
                "Highest in darkness: {:.1}° at {} (airmass {})",
                best.altitude,
                best.time,
                fmt_opt(best.airmass, 2)
            );
        }
        None => {
            let _ = writeln!(out, "No dark hours in this window");
        }
    }
    let _ = writeln!(
        out,
        "Dark hours above {:.0}°: {:.1}",
        summary.min_altitude, summary.dark_hours_above_minimum
    );
    let _ = writeln!(
        out,
        "Mean moon illumination: {:.0}%",
        summary.mean_moon_illumination * 100.0
    );
    out
}
