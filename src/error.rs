//! Configuration errors
//!
//! The simulation itself never fails; everything that can go wrong is caught
//! while building a match from its settings.

use core::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings file is not valid JSON for `MatchSettings`
    Parse(serde_json::Error),
    /// Character id outside the roster
    UnknownCharacter(u8),
    /// Map layout name not recognized
    UnknownLayout(String),
    /// A tunable is out of range
    InvalidValue { field: &'static str, reason: &'static str },
    /// Terrain grid with a zero dimension
    InvalidGrid { width: usize, height: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::UnknownCharacter(id) => write!(f, "unknown character id {id} (expected 1-3)"),
            Self::UnknownLayout(name) => write!(f, "unknown map layout '{name}'"),
            Self::InvalidValue { field, reason } => write!(f, "invalid {field}: {reason}"),
            Self::InvalidGrid { width, height } => {
                write!(f, "invalid terrain grid {width}x{height}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ConfigError::UnknownCharacter(7).to_string(),
            "unknown character id 7 (expected 1-3)"
        );
        assert_eq!(
            ConfigError::InvalidValue {
                field: "move_time_ms",
                reason: "must be positive"
            }
            .to_string(),
            "invalid move_time_ms: must be positive"
        );
    }

    #[test]
    fn test_parse_error_has_source() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
