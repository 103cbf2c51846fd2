use thiserror::Error;

/// Top-level error type for PixelSeeker.
///
/// Covers loading and saving configuration. The conversation core keeps its
/// own error types in `pixelseeker-chat`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PixelSeekerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for PixelSeekerError {
    fn from(err: toml::de::Error) -> Self {
        PixelSeekerError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PixelSeekerError {
    fn from(err: toml::ser::Error) -> Self {
        PixelSeekerError::Config(err.to_string())
    }
}

/// A specialized `Result` type for PixelSeeker operations.
pub type Result<T> = std::result::Result<T, PixelSeekerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PixelSeekerError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PixelSeekerError = io_err.into();
        assert!(matches!(err, PixelSeekerError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: PixelSeekerError = toml_err.into();
        assert!(matches!(err, PixelSeekerError::Config(_)));
    }

    #[test]
    fn test_toml_ser_error_conversion() {
        // A bare integer has no table to serialize into.
        let ser_err = toml::to_string(&42u32).unwrap_err();
        let err: PixelSeekerError = ser_err.into();
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
