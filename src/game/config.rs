//! Engine Configuration

use serde::{Serialize, Deserialize};

use crate::game::error::EngineError;
use crate::DEFAULT_REVEAL_PERIOD_LENGTH;

/// Environment variable holding the reveal period length.
pub const REVEAL_PERIOD_ENV: &str = "RPS_REVEAL_PERIOD_LENGTH";

/// Construction parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Blocks a game may sit in Move2 or Reveal1 before it can be timed out.
    pub reveal_period_length: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reveal_period_length: DEFAULT_REVEAL_PERIOD_LENGTH,
        }
    }
}

impl EngineConfig {
    /// Create a config with an explicit reveal period.
    pub fn new(reveal_period_length: u64) -> Self {
        Self { reveal_period_length }
    }

    /// Create config from environment variables.
    ///
    /// Falls back to the default when the variable is unset.
    pub fn from_env() -> Result<Self, EngineError> {
        match std::env::var(REVEAL_PERIOD_ENV) {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Parse a reveal period from text and validate it.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let reveal_period_length = raw.trim().parse::<u64>().map_err(|e| {
            EngineError::InvalidConfig(format!("{REVEAL_PERIOD_ENV}={raw:?}: {e}"))
        })?;
        let config = Self { reveal_period_length };
        config.validate()?;
        Ok(config)
    }

    /// Reject a zero-length reveal period.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.reveal_period_length == 0 {
            return Err(EngineError::InvalidConfig(
                "reveal period length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.reveal_period_length, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_rejected() {
        assert!(matches!(
            EngineConfig::new(0).validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse() {
        assert_eq!(EngineConfig::parse(" 12 ").unwrap().reveal_period_length, 12);
        assert!(matches!(EngineConfig::parse("0"), Err(EngineError::InvalidConfig(_))));
        assert!(matches!(EngineConfig::parse("-3"), Err(EngineError::InvalidConfig(_))));
        assert!(matches!(EngineConfig::parse("soon"), Err(EngineError::InvalidConfig(_))));
    }
}
