use thiserror::Error;

/// Errors produced while turning uploaded bytes into a bitmap
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Image load was cancelled before it finished")]
    Cancelled,
}

/// Errors that can occur when parsing a pen color
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),

    #[error("Color must have 3 or 6 hex digits: {0}")]
    InvalidLength(String),

    #[error("Invalid hex digit in color: {0}")]
    InvalidDigit(String),
}

/// Errors that can occur while loading the app configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
