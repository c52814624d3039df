use crate::adjustments::Tolerances;
use crate::domain::Decimal;
use crate::engine::CascadeParams;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub ledger_source: LedgerLocation,
    pub pis_rate: Decimal,
    pub ir_rate: Decimal,
    pub amount_tolerance: Decimal,
    pub spread_tolerance: Decimal,
}

/// Where the indicators document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerLocation {
    Path(String),
    Url(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let ledger_source = match (env_map.get("LEDGER_PATH"), env_map.get("LEDGER_URL")) {
            (Some(path), None) => LedgerLocation::Path(path.clone()),
            (None, Some(url)) => LedgerLocation::Url(url.clone()),
            (Some(_), Some(_)) => {
                return Err(ConfigError::InvalidValue(
                    "LEDGER_URL".to_string(),
                    "set only one of LEDGER_PATH or LEDGER_URL".to_string(),
                ))
            }
            (None, None) => return Err(ConfigError::MissingEnv("LEDGER_PATH".to_string())),
        };

        Ok(Config {
            port,
            ledger_source,
            pis_rate: decimal_var(&env_map, "PIS_RATE", "0.0465")?,
            ir_rate: decimal_var(&env_map, "IR_RATE", "0.30")?,
            amount_tolerance: decimal_var(&env_map, "AMOUNT_TOLERANCE", "0.01")?,
            spread_tolerance: decimal_var(&env_map, "SPREAD_TOLERANCE", "0.005")?,
        })
    }

    pub fn cascade_params(&self) -> CascadeParams {
        CascadeParams {
            pis_rate: self.pis_rate,
            ir_rate: self.ir_rate,
        }
    }

    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            amount: self.amount_tolerance,
            spread: self.spread_tolerance,
        }
    }
}

/// Non-negative decimal variable with a default.
fn decimal_var(
    env_map: &HashMap<String, String>,
    key: &str,
    default: &str,
) -> Result<Decimal, ConfigError> {
    let raw = env_map.get(key).map(|s| s.as_str()).unwrap_or(default);
    let value = Decimal::from_str_canonical(raw.trim()).map_err(|_| {
        ConfigError::InvalidValue(key.to_string(), format!("must be a decimal, got {}", raw))
    })?;
    if value.is_negative() {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(value)
}
