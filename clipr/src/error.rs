//! Clipboard error types shared by the codec and its backends

use compact_str::CompactString;
use thiserror::Error;

pub type ClipResult<T> = Result<T, ClipError>;

/// Failures surfaced by clipboard backends and the codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipError {
    #[error("Clipboard access denied: {0}")]
    AccessDenied(CompactString),

    #[error("Clipboard not available on this platform: {0}")]
    Unavailable(CompactString),

    #[error("Clipboard is busy, try again")]
    Occupied,

    #[error("Clipboard holds no {mime} representation")]
    ContentNotAvailable { mime: &'static str },

    #[error("Clipboard payload is empty")]
    EmptyPayload,

    #[error("Clipboard payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Clipboard conversion failed: {0}")]
    ConversionFailed(CompactString),

    #[error("Clipboard configuration error: {0}")]
    ConfigError(CompactString),
}

impl ClipError {
    /// Denials and missing content are expected at runtime and never fatal.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClipError::AccessDenied(_)
                | ClipError::Occupied
                | ClipError::ContentNotAvailable { .. }
                | ClipError::EmptyPayload
        )
    }

    #[inline]
    pub fn access_denied(reason: impl Into<CompactString>) -> Self {
        Self::AccessDenied(reason.into())
    }

    #[inline]
    pub fn config_error(reason: impl Into<CompactString>) -> Self {
        Self::ConfigError(reason.into())
    }
}

impl From<arboard::Error> for ClipError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ContentNotAvailable => ClipError::ContentNotAvailable { mime: "requested" },
            arboard::Error::ClipboardNotSupported => {
                ClipError::Unavailable(CompactString::const_new("clipboard not supported"))
            }
            arboard::Error::ClipboardOccupied => ClipError::Occupied,
            arboard::Error::ConversionFailure => {
                ClipError::ConversionFailed(CompactString::const_new("conversion failure"))
            }
            other => ClipError::AccessDenied(CompactString::from(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_is_recoverable_config_is_not() {
        assert!(ClipError::access_denied("blocked").is_recoverable());
        assert!(ClipError::EmptyPayload.is_recoverable());
        assert!(!ClipError::config_error("bad").is_recoverable());
        assert!(!ClipError::PayloadTooLarge { size: 10, max: 5 }.is_recoverable());
    }
}
