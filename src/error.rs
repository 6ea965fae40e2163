use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Invalid input format: expected two comma-separated values, got '{0}'")]
    InvalidPair(String),

    #[error("Invalid input format: '{0}' is not a number")]
    InvalidNumber(String),

    #[error("Latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),

    #[error("Declination {0} is outside -90..=90")]
    DeclinationOutOfRange(f64),

    #[error("Please select a date")]
    MissingDate,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum VisibilityError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Local time {0} does not exist in the observer's time zone")]
    InvalidLocalTime(String),

    #[error("Sample count must be at least 1")]
    EmptyWindow,

    #[error("Sample step must be positive, got {0} minutes")]
    InvalidStep(i64),

    #[error("{samples} samples every {step_minutes} minutes run past the supported date range")]
    WindowOutOfRange { samples: usize, step_minutes: i64 },
}

pub type Result<T> = std::result::Result<T, VisibilityError>;
