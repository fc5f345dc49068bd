//! API environment selection

use crate::error::PingenError;
use std::fmt;
use std::str::FromStr;

/// Which Pingen environment the client talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Live API, letters are actually printed and sent
    #[default]
    Production,
    /// Staging API for integration testing
    Staging,
}

impl Mode {
    /// Base URL of the API for this mode (no trailing slash)
    pub const fn base_url(self) -> &'static str {
        match self {
            Mode::Production => "https://api.pingen.com",
            Mode::Staging => "https://stage-api.pingen.com",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Production => f.write_str("production"),
            Mode::Staging => f.write_str("staging"),
        }
    }
}

impl FromStr for Mode {
    type Err = PingenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "1" => Ok(Mode::Production),
            "staging" | "stage" | "2" => Ok(Mode::Staging),
            other => Err(PingenError::Config(format!(
                "The specified mode does not exist: {other:?}"
            ))),
        }
    }
}

/// Numeric mode constants as used by the service's other client libraries
impl TryFrom<u8> for Mode {
    type Error = PingenError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Mode::Production),
            2 => Ok(Mode::Staging),
            other => Err(PingenError::Config(format!(
                "The specified mode does not exist: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urls() {
        assert_eq!(Mode::Production.base_url(), "https://api.pingen.com");
        assert_eq!(Mode::Staging.base_url(), "https://stage-api.pingen.com");
        assert_eq!(Mode::default(), Mode::Production);
    }

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("production".parse::<Mode>().unwrap(), Mode::Production);
        assert_eq!(" Staging ".parse::<Mode>().unwrap(), Mode::Staging);
        assert_eq!("stage".parse::<Mode>().unwrap(), Mode::Staging);
        assert_eq!(Mode::try_from(1u8).unwrap(), Mode::Production);
        assert_eq!(Mode::try_from(2u8).unwrap(), Mode::Staging);
    }

    #[test]
    fn test_unknown_mode_is_config_error() {
        assert!(matches!(
            "sandbox".parse::<Mode>(),
            Err(PingenError::Config(_))
        ));
        assert!(matches!(Mode::try_from(3u8), Err(PingenError::Config(_))));
        assert!(matches!(Mode::try_from(0u8), Err(PingenError::Config(_))));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for mode in [Mode::Production, Mode::Staging] {
            assert_eq!(mode.to_string().parse::<Mode>().unwrap(), mode);
        }
    }
}
