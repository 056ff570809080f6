use crate::server::error::config::ConfigError;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_STATS_ROW_BUDGET: u64 = 1000;
const DEFAULT_ENTITLEMENT_REPAIR_CRON: &str = "0 0 4 * * *";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Maximum number of orders a single dashboard computation reads
    pub stats_row_budget: u64,
    /// Cron expression (with seconds) for the batch entitlement repair
    pub entitlement_repair_cron: String,
    /// Whether the scheduled repair writes its results or only reports them
    pub entitlement_repair_commit: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let stats_row_budget = parse_optional("STATS_ROW_BUDGET", DEFAULT_STATS_ROW_BUDGET)?;
        if stats_row_budget == 0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "STATS_ROW_BUDGET".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            stats_row_budget,
            entitlement_repair_cron: optional("ENTITLEMENT_REPAIR_CRON")
                .unwrap_or_else(|| DEFAULT_ENTITLEMENT_REPAIR_CRON.to_string()),
            entitlement_repair_commit: parse_optional("ENTITLEMENT_REPAIR_COMMIT", false)?,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional(var) {
        Some(raw) => parse_value(var, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })
}
