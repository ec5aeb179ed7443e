use anyhow::anyhow;
use chrono_tz::Tz;
use std::{env, net::SocketAddr, str::FromStr};

use crate::utils::cookies::{CookieOptions, SameSite};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub session_timeout: chrono::Duration,
    /// Zero disables the background sweep; expiry is still enforced lazily.
    pub session_sweep_interval_secs: u64,
    pub seed_username: String,
    pub seed_password: Option<String>,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    pub cors_allow_origins: Vec<String>,
    pub time_zone: Tz,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr: SocketAddr = parse_var(&lookup, "BIND_ADDR", "0.0.0.0:3000")?;

        let session_timeout_minutes: i64 = parse_var(&lookup, "SESSION_TIMEOUT_MINUTES", "30")?;
        if session_timeout_minutes <= 0 {
            return Err(anyhow!("SESSION_TIMEOUT_MINUTES must be positive"));
        }
        let session_timeout = chrono::Duration::try_minutes(session_timeout_minutes)
            .ok_or_else(|| {
                anyhow!("Invalid SESSION_TIMEOUT_MINUTES value: {}", session_timeout_minutes)
            })?;

        let session_sweep_interval_secs: u64 =
            parse_var(&lookup, "SESSION_SWEEP_INTERVAL_SECS", "300")?;

        let seed_username =
            lookup("SEED_USERNAME").unwrap_or_else(|| "testuser".to_string());
        let seed_password = lookup("TESTUSER_PASSWORD").filter(|p| !p.is_empty());

        let cookie_secure: bool = parse_var(&lookup, "COOKIE_SECURE", "false")?;
        let cookie_same_site = lookup("COOKIE_SAME_SITE")
            .unwrap_or_else(|| "Lax".to_string())
            .parse::<SameSite>()
            .map_err(|e| anyhow!("Invalid COOKIE_SAME_SITE value: {}", e))?;

        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let time_zone_name = lookup("APP_TIMEZONE").unwrap_or_else(|| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        Ok(Config {
            bind_addr,
            session_timeout,
            session_sweep_interval_secs,
            seed_username,
            seed_password,
            cookie_secure,
            cookie_same_site,
            cors_allow_origins,
            time_zone,
        })
    }

    pub fn cookie_options(&self) -> CookieOptions {
        CookieOptions {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: &str) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", key, raw))
}
