//! Environment configuration.

use std::env;
use std::time::Duration;

pub const DEFAULT_WS_URL: &str = "ws://127.0.0.1:8000";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub ws_url: String,
    pub api_base: String,
    pub log_filter: Option<String>,
    pub connect_retries: u32,
    pub connect_timeout: Option<Duration>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            log_filter: None,
            connect_retries: 0,
            connect_timeout: None,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ws_url: env_string_opt("SCHED_TELEMETRY_WS_URL").unwrap_or(defaults.ws_url),
            api_base: env_string_opt("SCHED_TELEMETRY_API_BASE").unwrap_or(defaults.api_base),
            log_filter: env_string_opt("SCHED_TELEMETRY_LOG"),
            connect_retries: env_parse_opt("SCHED_TELEMETRY_CONNECT_RETRIES")
                .unwrap_or(defaults.connect_retries),
            connect_timeout: env_parse_opt::<u64>("SCHED_TELEMETRY_CONNECT_TIMEOUT_MS")
                .filter(|millis| *millis > 0)
                .map(Duration::from_millis),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_parse_opt<T: std::str::FromStr>(key: &str) -> Option<T> {
    env_string_opt(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::{EnvConfig, DEFAULT_API_BASE, DEFAULT_WS_URL};
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    const KEYS: [&str; 5] = [
        "SCHED_TELEMETRY_WS_URL",
        "SCHED_TELEMETRY_API_BASE",
        "SCHED_TELEMETRY_LOG",
        "SCHED_TELEMETRY_CONNECT_RETRIES",
        "SCHED_TELEMETRY_CONNECT_TIMEOUT_MS",
    ];

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    fn clear_all() -> Vec<EnvGuard> {
        KEYS.iter().map(|key| set_env_guard(key, None)).collect()
    }

    #[test]
    fn env_defaults_apply_when_unset() {
        let _lock = env_lock();
        let _guards = clear_all();

        let config = EnvConfig::from_env();
        assert_eq!(config.ws_url, DEFAULT_WS_URL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.log_filter.is_none());
        assert_eq!(config.connect_retries, 0);
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn env_values_override_defaults() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("SCHED_TELEMETRY_WS_URL", Some("ws://sim.local:9000"));
        let _g2 = set_env_guard("SCHED_TELEMETRY_API_BASE", Some("http://sim.local:9000/"));
        let _g3 = set_env_guard("SCHED_TELEMETRY_LOG", Some("debug"));
        let _g4 = set_env_guard("SCHED_TELEMETRY_CONNECT_RETRIES", Some("3"));
        let _g5 = set_env_guard("SCHED_TELEMETRY_CONNECT_TIMEOUT_MS", Some("1500"));

        let config = EnvConfig::from_env();
        assert_eq!(config.ws_url, "ws://sim.local:9000");
        assert_eq!(config.api_base, "http://sim.local:9000/");
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.connect_retries, 3);
        assert_eq!(config.connect_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn empty_and_unparsable_values_are_ignored() {
        let _lock = env_lock();
        let _guards = clear_all();
        let _g1 = set_env_guard("SCHED_TELEMETRY_WS_URL", Some("  "));
        let _g2 = set_env_guard("SCHED_TELEMETRY_CONNECT_RETRIES", Some("many"));
        let _g3 = set_env_guard("SCHED_TELEMETRY_CONNECT_TIMEOUT_MS", Some("0"));

        let config = EnvConfig::from_env();
        assert_eq!(config.ws_url, DEFAULT_WS_URL);
        assert_eq!(config.connect_retries, 0);
        assert!(config.connect_timeout.is_none());
    }
}
