//! Configuration and settings management
//!
//! Loads settings from config files and environment variables and defines
//! the tunable constants used by the timer, session store and HTTP adapters.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application settings loaded from environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Telegram Bot API token
    pub telegram_token: String,

    /// Group that receives anonymous confessions (numeric id or `@username`)
    #[serde(default)]
    pub group_id: Option<String>,

    /// Channel users must join before using the bot (`@username` or numeric id)
    #[serde(default)]
    pub channel_link: Option<String>,

    /// OpenWeatherMap API key
    pub weather_api_key: Option<String>,
    /// Last.fm API key
    pub lastfm_api_key: Option<String>,

    /// Port for the liveness endpoint
    #[serde(default = "default_port")]
    pub port: u16,
}

const fn default_port() -> u16 {
    5000
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use super_bot::config::Settings;
    ///
    /// let settings = Settings::new().expect("Failed to load configuration");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Not checked into git
            .add_source(File::with_name("config/local").required(false))
            // Eg.. `APP__PORT=8080 ./target/super-bot` would set the `port` key
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Unprefixed UPPER_SNAKE_CASE variables, empty values treated as unset
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        s.try_deserialize()
    }

    /// Channel identifier used for membership checks and the join prompt.
    ///
    /// Falls back to an empty string, which makes every membership lookup fail
    /// and therefore denies access.
    #[must_use]
    pub fn channel(&self) -> &str {
        self.channel_link.as_deref().unwrap_or_default()
    }
}

/// Default HTTP timeout (seconds) for external service calls.
pub const HTTP_TIMEOUT_SECS: u64 = 30;
/// Length of a Pomodoro work session in minutes.
pub const POMODORO_WORK_MINUTES: u64 = 25;
/// Length of a Pomodoro break in minutes.
pub const POMODORO_BREAK_MINUTES: u64 = 5;
/// Longest accepted Pomodoro work or break length in minutes (one day).
pub const POMODORO_MAX_MINUTES: u64 = 1_440;
/// Idle time (seconds) after which a session and its pending answer are evicted.
/// Default: 24 hours.
pub const SESSION_IDLE_SECS: u64 = 86_400;
/// Maximum number of sessions kept in memory.
pub const SESSION_MAX_CAPACITY: u64 = 10_000;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Reads a Pomodoro length; zero, unparsable or over [`POMODORO_MAX_MINUTES`]
/// falls back to `default`.
fn pomodoro_minutes_or(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|m| (1..=POMODORO_MAX_MINUTES).contains(m))
        .unwrap_or(default)
}

/// Converts whole minutes into a `Duration`, using `default_minutes` when the
/// product would overflow.
#[must_use]
pub fn minutes_to_duration(minutes: u64, default_minutes: u64) -> Duration {
    let secs = minutes
        .checked_mul(60)
        .or_else(|| default_minutes.checked_mul(60))
        .unwrap_or(u64::MAX);
    Duration::from_secs(secs)
}

/// Get HTTP timeout from env or default.
///
/// Environment variable: `HTTP_TIMEOUT_SECS`.
#[must_use]
pub fn get_http_timeout_secs() -> u64 {
    env_or("HTTP_TIMEOUT_SECS", HTTP_TIMEOUT_SECS)
}

/// Get Pomodoro work length from env or default.
///
/// Environment variable: `POMODORO_WORK_MINUTES`. Must be 1..=1440.
#[must_use]
pub fn get_pomodoro_work_minutes() -> u64 {
    pomodoro_minutes_or("POMODORO_WORK_MINUTES", POMODORO_WORK_MINUTES)
}

/// Get Pomodoro break length from env or default.
///
/// Environment variable: `POMODORO_BREAK_MINUTES`. Must be 1..=1440.
#[must_use]
pub fn get_pomodoro_break_minutes() -> u64 {
    pomodoro_minutes_or("POMODORO_BREAK_MINUTES", POMODORO_BREAK_MINUTES)
}

/// Get session idle time from env or default.
///
/// Environment variable: `SESSION_IDLE_SECS`.
#[must_use]
pub fn get_session_idle_secs() -> u64 {
    env_or("SESSION_IDLE_SECS", SESSION_IDLE_SECS)
}

/// Get session store capacity from env or default.
///
/// Environment variable: `SESSION_MAX_CAPACITY`.
#[must_use]
pub fn get_session_max_capacity() -> u64 {
    env_or("SESSION_MAX_CAPACITY", SESSION_MAX_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // Single test touching the environment to avoid races between tests
    #[test]
    fn test_config_env_loading() -> Result<(), Box<dyn std::error::Error>> {
        env::set_var("TELEGRAM_TOKEN", "dummy_token");
        env::set_var("CHANNEL_LINK", "@superchannel");
        env::set_var("GROUP_ID", "-100123");
        env::set_var("PORT", "8080");

        let settings = Settings::new()?;
        assert_eq!(settings.telegram_token, "dummy_token");
        assert_eq!(settings.channel(), "@superchannel");
        assert_eq!(settings.group_id.as_deref(), Some("-100123"));
        assert_eq!(settings.port, 8080);

        env::remove_var("CHANNEL_LINK");
        env::remove_var("PORT");
        env::set_var("WEATHER_API_KEY", "");

        let settings = Settings::new()?;
        assert_eq!(settings.channel(), "");
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.weather_api_key, None);

        env::remove_var("WEATHER_API_KEY");
        env::remove_var("GROUP_ID");
        env::remove_var("TELEGRAM_TOKEN");
        Ok(())
    }

    #[test]
    fn test_tunable_defaults() {
        assert_eq!(env_or("SUPER_BOT_UNSET_TUNABLE", 25_u64), 25);
        assert_eq!(get_pomodoro_break_minutes(), POMODORO_BREAK_MINUTES);
    }

    #[test]
    fn test_pomodoro_minutes_reject_zero_and_out_of_range() {
        let key = "SUPER_BOT_TEST_POMODORO_MINUTES";
        for bad in ["0", "-3", "abc", "1441", "18446744073709551615"] {
            env::set_var(key, bad);
            assert_eq!(pomodoro_minutes_or(key, 25), 25, "{bad} should fall back");
        }
        env::set_var(key, " 50 ");
        assert_eq!(pomodoro_minutes_or(key, 25), 50);
        env::remove_var(key);
        assert_eq!(pomodoro_minutes_or(key, 5), 5);
    }

    #[test]
    fn test_minutes_to_duration_does_not_overflow() {
        assert_eq!(minutes_to_duration(25, 25), Duration::from_secs(1_500));
        assert_eq!(minutes_to_duration(u64::MAX, 5), Duration::from_secs(300));
    }
}
