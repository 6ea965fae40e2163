pub mod angles;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod input;
pub mod render;
pub mod types;
pub mod visibility;

pub use angles::{
    airmass, altitude, azimuth, deg_to_rad, hour_angle, julian_date, local_sidereal_time,
    normalize_angle, rad_to_deg, target_altitude_at, zenith_angle, DEGREES_PER_HOUR, J2000,
};

pub use ephemeris::{moon_illumination, moon_position, sun_position};

pub use error::{InputError, VisibilityError};

pub use input::{parse_date, parse_location, parse_target, parse_time_zone};

pub use visibility::{
    calculate_object_visibility, sky_bands, sky_condition, summarize, window_start,
    ASTRONOMICAL_TWILIGHT,
};

pub use types::{
    BodyPosition, MoonIllumination, MoonPosition, ObserverLocation, SampleWindow, SkyBand,
    SkyCondition, Target, VisibilityConfig, VisibilitySample, VisibilitySummary,
};
