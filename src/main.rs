use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use night_sky_visibility::config::AppConfig;
use night_sky_visibility::render::{self, OutputFormat, VisibilityReport};
use night_sky_visibility::types::{SampleWindow, VisibilityConfig};
use night_sky_visibility::{input, visibility};

#[derive(Parser, Debug)]
#[command(name = "sky-visibility")]
#[command(version)]
#[command(about = "Plot a target's altitude, the moon and twilight over one night")]
struct Args {
    /// Observatory location as "lat, lon" (e.g. "40.7128, -74.0060")
    #[arg(short, long, allow_hyphen_values = true)]
    location: Option<String>,

    /// Observation date (YYYY-MM-DD)
    #[arg(short, long)]
    date: String,

    /// Target object as "RA, Dec" (RA in degrees, "5.57h" or "05:34:31")
    #[arg(short, long, allow_hyphen_values = true)]
    target: String,

    /// Object name shown in the output
    #[arg(short, long)]
    name: Option<String>,

    /// IANA time zone for hour labels (default: config, then UTC)
    #[arg(long)]
    tz: Option<String>,

    /// Sampling window: noon (noon-to-noon) or midnight
    #[arg(short, long)]
    window: Option<SampleWindow>,

    /// Minimum altitude counted as observable in the summary
    #[arg(long, allow_hyphen_values = true)]
    min_altitude: Option<f64>,

    /// Output format: table, json or csv
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Store location, time zone and window as defaults
    #[arg(long)]
    save_defaults: bool,
}

fn main() {
    // Logs go to stderr so piped json/csv stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error generating chart: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = AppConfig::load();

    let location_text = args
        .location
        .or_else(|| config.location.clone())
        .context("No location given; pass --location \"lat, lon\" or save one with --save-defaults")?;
    let observer = input::parse_location(&location_text)?;
    let target = input::parse_target(&args.target, args.name.as_deref())?;
    let date = input::parse_date(&args.date)?;

    let tz = match args.tz.as_deref() {
        Some(name) => input::parse_time_zone(name)?,
        None => config.time_zone(),
    };

    let window = args.window.unwrap_or(config.window);
    let min_altitude = args.min_altitude.unwrap_or(config.min_altitude);

    let vis_config = VisibilityConfig {
        window,
        ..VisibilityConfig::default()
    };
    let samples = visibility::calculate_object_visibility(date, &tz, &observer, &target, &vis_config)?;
    let bands = visibility::sky_bands(&samples);
    let summary = visibility::summarize(&samples, min_altitude);

    let report = VisibilityReport {
        target_name: target.display_name(),
        target: &target,
        observer: &observer,
        date,
        timezone: tz.name().to_string(),
        samples: &samples,
        bands: &bands,
        summary: &summary,
    };
    let output = render::render(&report, args.format).context("Failed to render output")?;
    println!("{}", output.trim_end());

    if args.save_defaults {
        config.location = Some(location_text);
        config.timezone = Some(tz.name().to_string());
        config.window = window;
        config.min_altitude = min_altitude;
        let path = config.save()?;
        eprintln!("Saved defaults to {}", path.display());
    }

    Ok(())
}
