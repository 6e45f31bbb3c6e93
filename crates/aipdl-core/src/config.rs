use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::retry::RetryPolicy;

/// Upper bound on fetch+merge cycles per airport: the first cycle plus one
/// forced re-fetch.
pub const MAX_CYCLES: u32 = 2;

/// Transient-failure retry for a single unit fetch (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per unit fetch (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: std::time::Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: std::time::Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// libcurl transfer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Hard wall-clock limit for one transfer.
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Netscape cookie file with an authenticated session, if the site needs one.
    #[serde(default)]
    pub cookie_file: Option<PathBuf>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 600,
            user_agent: None,
            cookie_file: None,
        }
    }
}

/// Global configuration loaded from `~/.config/aipdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AipdlConfig {
    /// Root of the download tree: `<root>/<country>/<YYYYMMDD>/<airport>/`.
    pub root_dir: PathBuf,
    /// Subdirectory of the document directory receiving merged artifacts.
    pub merge_dir: String,
    /// Fetch workers shared by the whole batch.
    pub max_workers: usize,
    /// Capacity of the shared job queue.
    pub queue_capacity: usize,
    /// Airports whose fetch/merge cycle may be in flight at once.
    pub max_concurrent_airports: usize,
    /// Full fetch+merge cycles per airport: 1 (no forced retry) or 2.
    pub max_attempts: u32,
    /// Also download each airport's index page next to its charts.
    #[serde(default)]
    pub fetch_index_pages: bool,
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for AipdlConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("aip"),
            merge_dir: "merged".to_string(),
            max_workers: 5,
            queue_capacity: 10,
            max_concurrent_airports: 4,
            max_attempts: 2,
            fetch_index_pages: false,
            retry: None,
            http: None,
        }
    }
}

impl AipdlConfig {
    /// Cycles per airport, clamped to `1..=MAX_CYCLES`.
    pub fn attempt_limit(&self) -> u32 {
        self.max_attempts.clamp(1, MAX_CYCLES)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }

    pub fn http(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("aipdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AipdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AipdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<AipdlConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: AipdlConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AipdlConfig::default();
        assert_eq!(cfg.max_workers, 5);
        assert_eq!(cfg.queue_capacity, 10);
        assert_eq!(cfg.max_attempts, 2);
        assert_eq!(cfg.merge_dir, "merged");
        assert!(!cfg.fetch_index_pages);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = AipdlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AipdlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.max_workers, cfg.max_workers);
        assert_eq!(parsed.root_dir, cfg.root_dir);
        assert_eq!(parsed.merge_dir, cfg.merge_dir);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            root_dir = "/srv/aip"
            merge_dir = "out"
            max_workers = 2
            queue_capacity = 4
            max_concurrent_airports = 1
            max_attempts = 0
        "#;
        let cfg: AipdlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.root_dir, PathBuf::from("/srv/aip"));
        assert_eq!(cfg.max_workers, 2);
        assert_eq!(cfg.attempt_limit(), 1);
        assert!(cfg.retry.is_none());
        assert_eq!(cfg.http().connect_timeout_secs, 30);
    }

    #[test]
    fn attempt_limit_never_exceeds_two_cycles() {
        let cfg = AipdlConfig {
            max_attempts: 3,
            ..AipdlConfig::default()
        };
        assert_eq!(cfg.attempt_limit(), 2);
        let cfg = AipdlConfig {
            max_attempts: u32::MAX,
            ..AipdlConfig::default()
        };
        assert_eq!(cfg.attempt_limit(), MAX_CYCLES);
    }

    #[test]
    fn config_toml_retry_and_http() {
        let toml = r#"
            root_dir = "aip"
            merge_dir = "merged"
            max_workers = 5
            queue_capacity = 10
            max_concurrent_airports = 4
            max_attempts = 2
            fetch_index_pages = true

            [retry]
            max_attempts = 4
            base_delay_secs = 0.5
            max_delay_secs = 15

            [http]
            connect_timeout_secs = 5
            timeout_secs = 60
            user_agent = "aipdl-test"
        "#;
        let cfg: AipdlConfig = toml::from_str(toml).unwrap();
        assert!(cfg.fetch_index_pages);
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.base_delay, std::time::Duration::from_millis(500));
        assert_eq!(cfg.http().user_agent.as_deref(), Some("aipdl-test"));
    }
}
