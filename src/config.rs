use std::env;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveTime, Timelike};

use crate::dashboard::lateness::LatenessPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub jwt_secret: String,

    // Upstream HR API
    pub upstream_base_url: String,
    pub upstream_timeout_secs: u64,

    // Rate limiting
    pub rate_public_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    pub lateness: LatenessPolicy,

    pub log_dir: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let office_start = or_default("OFFICE_START", "10:00");
        let start = NaiveTime::parse_from_str(&office_start, "%H:%M")
            .with_context(|| format!("OFFICE_START must be HH:MM, got {office_start:?}"))?;

        let lateness = LatenessPolicy {
            start_minutes: start.hour() as i64 * 60 + start.minute() as i64,
            late_low: parse_num(&or_default("LATE_LOW_MINUTES", "10"), "LATE_LOW_MINUTES")?,
            late_high: parse_num(&or_default("LATE_HIGH_MINUTES", "30"), "LATE_HIGH_MINUTES")?,
        };
        if lateness.late_low < 1 || lateness.late_high < 1 {
            return Err(anyhow!(
                "LATE_LOW_MINUTES ({}) and LATE_HIGH_MINUTES ({}) must be at least 1",
                lateness.late_low,
                lateness.late_high
            ));
        }
        if lateness.late_low > lateness.late_high {
            return Err(anyhow!(
                "LATE_LOW_MINUTES ({}) must not exceed LATE_HIGH_MINUTES ({})",
                lateness.late_low,
                lateness.late_high
            ));
        }

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            jwt_secret: required("JWT_SECRET")?,
            upstream_base_url: required("UPSTREAM_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            upstream_timeout_secs: parse_num(
                &or_default("UPSTREAM_TIMEOUT_SECS", "10"),
                "UPSTREAM_TIMEOUT_SECS",
            )?,
            rate_public_per_min: parse_num(&or_default("RATE_PUBLIC_PER_MIN", "60"), "RATE_PUBLIC_PER_MIN")?,
            rate_protected_per_min: parse_num(
                &or_default("RATE_PROTECTED_PER_MIN", "1000"),
                "RATE_PROTECTED_PER_MIN",
            )?,
            api_prefix: or_default("API_PREFIX", "/api"),
            lateness,
            log_dir: or_default("LOG_DIR", "logs"),
            log_level: or_default("LOG_LEVEL", "debug"),
        })
    }
}

fn parse_num<T>(raw: &str, key: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("{key} must be a number, got {raw:?}"))
}
