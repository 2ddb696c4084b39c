//! Named constants and runtime configuration.

use crate::error::{QuoteError, Result};
use crate::types::RollCatalog;

/// Standard roll stock widths in centimeters.
pub const STANDARD_ROLL_WIDTHS_CM: [f64; 2] = [61.0, 111.0];

/// Waste is priced at this fraction of the sell price when a material has no cost price.
pub const DEFAULT_WASTE_PRICE_RATIO: f64 = 0.3;

pub const CM_PER_M: f64 = 100.0;

/// Discount applied to PIX and cash payments.
pub const CASH_DISCOUNT_RATE: f64 = 0.15;

/// Interest-free installments offered on card payments.
pub const CARD_INSTALLMENTS: u32 = 3;

pub const DEFAULT_ORDER_EMAIL: &str = "contato@molduraspanorama.com.br";

pub const CURRENCY_SYMBOL: &str = "R$";

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_LOG_FILE: &str = "development.log";

/// HTTP service settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub log_file: String,
    pub sentry_dsn: Option<String>,
    pub order_email: String,
    pub rolls: RollCatalog,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| QuoteError::InvalidConfig {
                key: "PORT".to_string(),
                message: format!("'{v}' is not a valid port number"),
            })?,
            None => DEFAULT_PORT,
        };

        let rolls = match get("ROLL_WIDTHS") {
            Some(v) => parse_roll_widths(&v).map_err(|e| QuoteError::InvalidConfig {
                key: "ROLL_WIDTHS".to_string(),
                message: e.to_string(),
            })?,
            None => RollCatalog::standard(),
        };

        Ok(Self {
            port,
            log_file: get("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            sentry_dsn: get("SENTRY_DSN"),
            order_email: get("ORDER_EMAIL").unwrap_or_else(|| DEFAULT_ORDER_EMAIL.to_string()),
            rolls,
        })
    }
}

/// Parses a comma-separated list of roll widths in centimeters, e.g. `61,111`.
pub fn parse_roll_widths(s: &str) -> Result<RollCatalog> {
    let widths = s
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| QuoteError::InvalidRollCatalog(format!("invalid roll width '{part}'")))
        })
        .collect::<Result<Vec<_>>>()?;
    RollCatalog::new(widths)
}
