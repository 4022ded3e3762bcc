use crate::error::{ClipError, ClipResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Largest rich-HTML payload accepted on capture, in bytes
    pub max_payload_bytes: usize,

    /// Optional plain-text alternative offered next to the HTML on write.
    /// None keeps the clipboard strictly rich-HTML.
    pub html_alt_text: Option<String>,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: 8 * 1024 * 1024,
            html_alt_text: None,
        }
    }
}

impl ClipboardConfig {
    pub fn validate(&self) -> ClipResult<()> {
        if self.max_payload_bytes == 0 {
            return Err(ClipError::config_error(
                "max_payload_bytes must be greater than zero",
            ));
        }

        if let Some(alt) = &self.html_alt_text
            && alt.trim().is_empty()
        {
            return Err(ClipError::config_error(
                "html_alt_text must not be blank when set",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ClipboardConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_limit_and_blank_alt_are_rejected() {
        let zero = ClipboardConfig {
            max_payload_bytes: 0,
            ..ClipboardConfig::default()
        };
        assert!(zero.validate().is_err());

        let blank = ClipboardConfig {
            html_alt_text: Some("  ".into()),
            ..ClipboardConfig::default()
        };
        assert!(blank.validate().is_err());
    }
}
