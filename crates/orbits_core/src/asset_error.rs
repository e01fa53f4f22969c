//! Asset error types
//!
//! Errors raised while reading or decoding textures. None of them are fatal to
//! the scene: a failed load leaves the material untextured.

use std::io;
use std::fmt;

/// Error type for asset operations
#[derive(Debug)]
pub enum AssetError {
    /// IO error (permission denied, interrupted read, etc.)
    Io(io::Error),
    /// Decode error (unsupported or corrupt image data)
    Decode(String),
    /// No file at the requested path
    NotFound(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(err) => write!(f, "Asset IO error: {}", err),
            AssetError::Decode(msg) => write!(f, "Asset decode error: {}", msg),
            AssetError::NotFound(path) => write!(f, "Asset not found: {}", path),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(err) => Some(err),
            AssetError::Decode(_) => None,
            AssetError::NotFound(_) => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(err: io::Error) -> Self {
        AssetError::Io(err)
    }
}

impl From<image::ImageError> for AssetError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io_err) => AssetError::Io(io_err),
            other => AssetError::Decode(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_variants() {
        let io_err = AssetError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(io_err.to_string().contains("IO error"));
        assert!(io_err.to_string().contains("denied"));

        let decode = AssetError::Decode("bad header".to_string());
        assert_eq!(decode.to_string(), "Asset decode error: bad header");

        let missing = AssetError::NotFound("earth/earth.jpg".to_string());
        assert!(missing.to_string().contains("earth/earth.jpg"));
    }

    #[test]
    fn test_from_io_error() {
        let err: AssetError = io::Error::new(io::ErrorKind::Interrupted, "eintr").into();
        match err {
            AssetError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::Interrupted),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_source() {
        use std::error::Error;

        let io_err = AssetError::Io(io::Error::new(io::ErrorKind::Other, "x"));
        assert!(io_err.source().is_some());
        assert!(AssetError::Decode("x".into()).source().is_none());
        assert!(AssetError::NotFound("x".into()).source().is_none());
    }
}
