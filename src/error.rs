//! The crate-wide error type.
//!
//! Every failure is scoped to the call that raised it; no error here is
//! recovered internally and none of them leave the registry or parse cache
//! in a modified state.

use thiserror::Error;

use crate::Space;

/// Errors raised by parsing, conversion routing and palette generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input string was empty or whitespace-only.
    #[error("Input color cannot be empty")]
    EmptyInput,

    /// A hex color did not have 3, 4, 6 or 8 hex digits, or contained
    /// non-hex characters.
    #[error("Invalid hex color format: {0:?}")]
    InvalidHex(String),

    /// A `ChromaKit|v1` string had the wrong token count, a bad component,
    /// or an alpha outside [0, 1].
    #[error("Invalid ChromaKit v1 format: {0}")]
    InvalidV1(String),

    /// The functional prefix of the input is not a registered format.
    #[error("Unsupported color format: {0:?}")]
    UnsupportedFormat(String),

    /// A recognized format failed to parse for a reason not covered by a
    /// more specific variant.
    #[error("Failed to parse color: {0}")]
    ParseFailed(String),

    /// No path of registered conversion edges connects the two spaces.
    #[error("No conversion path registered from {0:?} to {1:?}")]
    NoConversionPath(Space, Space),

    /// The requested palette generator family is not registered.
    #[error("Unknown generator family: {0}")]
    UnknownFamily(String),

    /// The requested delta-E algorithm name is not recognized.
    #[error("Unknown delta-E algorithm: {0}")]
    UnknownDeltaE(String),

    /// The requested contrast algorithm name is not recognized.
    #[error("Unknown contrast algorithm: {0}")]
    UnknownContrast(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_violated_rule() {
        assert!(Error::EmptyInput.to_string().contains("cannot be empty"));
        assert!(Error::InvalidHex("#zz".into())
            .to_string()
            .contains("Invalid hex color format"));
        assert!(Error::UnsupportedFormat("cmyk(...)".into())
            .to_string()
            .contains("Unsupported color format"));
        assert!(Error::UnknownFamily("Material".into())
            .to_string()
            .contains("Unknown generator family: Material"));
        assert!(Error::ParseFailed("bad number".into())
            .to_string()
            .contains("Failed to parse color"));
        assert!(Error::NoConversionPath(Space::Srgb, Space::Oklab)
            .to_string()
            .contains("No conversion path registered"));
    }
}
