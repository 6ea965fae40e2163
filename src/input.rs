//! Parsing of the free-text observer, target and date fields.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::angles::{hours_to_degrees, normalize_angle};
use crate::error::InputError;
use crate::types::{ObserverLocation, Target};

pub type Result<T> = std::result::Result<T, InputError>;

fn split_pair(input: &str) -> Result<(&str, &str)> {
    let mut parts = input.split(',').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) if !a.is_empty() && !b.is_empty() => Ok((a, b)),
        _ => Err(InputError::InvalidPair(input.trim().to_string())),
    }
}

fn parse_number(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::InvalidNumber(s.trim().to_string()))
}

/// `dd:mm:ss` (or `dd:mm`) to a decimal value; the sign of the leading field applies to the whole.
/// Minutes and seconds must be below 60.
fn parse_sexagesimal(s: &str) -> Result<f64> {
    let s = s.trim();
    let invalid = || InputError::InvalidNumber(s.to_string());
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let fields: Vec<&str> = unsigned.split(':').collect();
    if fields.len() < 2 || fields.len() > 3 {
        return Err(invalid());
    }
    let mut value = 0.0;
    let mut scale = 1.0;
    for (i, field) in fields.iter().enumerate() {
        let field = field.trim();
        if field.starts_with(['-', '+']) {
            return Err(invalid());
        }
        let v = parse_number(field).map_err(|_| invalid())?;
        if i > 0 && v >= 60.0 {
            return Err(invalid());
        }
        value += v / scale;
        scale *= 60.0;
    }
    Ok(if negative { -value } else { value })
}

pub fn parse_right_ascension(s: &str) -> Result<f64> {
    let s = s.trim();
    let degrees = if let Some(hours) = s.strip_suffix(['h', 'H']) {
        hours_to_degrees(parse_number(hours)?)
    } else if s.contains(':') {
        hours_to_degrees(parse_sexagesimal(s)?)
    } else {
        parse_number(s)?
    };
    Ok(normalize_angle(degrees))
}

pub fn parse_declination(s: &str) -> Result<f64> {
    let s = s.trim();
    let dec = if s.contains(':') {
        parse_sexagesimal(s)?
    } else {
        parse_number(s)?
    };
    if !(-90.0..=90.0).contains(&dec) {
        return Err(InputError::DeclinationOutOfRange(dec));
    }
    Ok(dec)
}

pub fn parse_location(input: &str) -> Result<ObserverLocation> {
    let (lat, lon) = split_pair(input)?;
    let latitude = parse_number(lat)?;
    let longitude = parse_number(lon)?;
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(InputError::LatitudeOutOfRange(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(InputError::LongitudeOutOfRange(longitude));
    }
    Ok(ObserverLocation {
        latitude,
        longitude,
    })
}

pub fn parse_target(input: &str, name: Option<&str>) -> Result<Target> {
    let (ra, dec) = split_pair(input)?;
    Ok(Target {
        right_ascension: parse_right_ascension(ra)?,
        declination: parse_declination(dec)?,
        name: name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    })
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(InputError::MissingDate);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| InputError::InvalidDate(input.to_string()))
}

pub fn parse_time_zone(input: &str) -> Result<Tz> {
    input
        .trim()
        .parse::<Tz>()
        .map_err(|_| InputError::UnknownTimeZone(input.trim().to_string()))
}
