use serde::Deserialize;

use fairway_banker::MAX_PLAYERS;
use fairway_banker::config::BankerRules;
use fairway_banker::settlement::MAX_MULTIPLIER;
use fairway_core::course::MAX_HOLES;

/// Largest `limits.max_dots` for which a full round of fully multiplied
/// banker totals stays within `i32`.
pub const MAX_DOTS_CEILING: u32 =
    i32::MAX as u32 / MAX_MULTIPLIER / (MAX_PLAYERS as u32 - 1) / MAX_HOLES as u32;

/// Top-level server configuration, loaded from `fairway.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub limits: LimitsConfig,
    pub rounds: RoundsConfig,
    /// Rules applied to rounds created without their own.
    pub banker: BankerRules,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            limits: LimitsConfig::default(),
            rounds: RoundsConfig::default(),
            banker: BankerRules::default(),
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Rounds held in memory at once.
    pub max_rounds: usize,
    /// Largest dot value accepted in a settlement or hole setup.
    pub max_dots: u32,
    /// Longest accepted player display name.
    pub max_name_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_rounds: 1000,
            max_dots: 1000,
            max_name_len: 64,
        }
    }
}

/// Round lifecycle configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoundsConfig {
    pub idle_timeout_secs: u64,
    pub idle_check_interval_secs: u64,
}

impl Default for RoundsConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 12 * 3600,
            idle_check_interval_secs: 300,
        }
    }
}

impl ServerConfig {
    /// Check the configuration, returning every problem found.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            problems.push(format!(
                "listen_addr {:?} is not a valid socket address",
                self.listen_addr
            ));
        }
        if self.limits.max_rounds == 0 {
            problems.push("limits.max_rounds must be > 0".to_string());
        }
        if self.limits.max_dots == 0 {
            problems.push("limits.max_dots must be > 0".to_string());
        }
        if self.limits.max_dots > MAX_DOTS_CEILING {
            problems.push(format!("limits.max_dots must be <= {MAX_DOTS_CEILING}"));
        }
        if self.limits.max_name_len == 0 {
            problems.push("limits.max_name_len must be > 0".to_string());
        }
        if self.rounds.idle_timeout_secs == 0 {
            problems.push("rounds.idle_timeout_secs must be > 0".to_string());
        }
        if self.rounds.idle_check_interval_secs == 0 {
            problems.push("rounds.idle_check_interval_secs must be > 0".to_string());
        }
        if self.banker.default_dots > self.limits.max_dots {
            problems.push("banker.default_dots exceeds limits.max_dots".to_string());
        }
        problems
    }

    /// Validate configuration, logging each problem and exiting if any exist.
    pub fn validate(&self) {
        let problems = self.problems();
        for p in &problems {
            tracing::error!("{p}");
        }
        if !problems.is_empty() {
            std::process::exit(1);
        }
    }

    /// Load config from `fairway.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let path = std::env::var("FAIRWAY_CONFIG").unwrap_or_else(|_| "fairway.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No {path} found, using defaults");
                ServerConfig::default()
            },
        };

        if let Ok(addr) = std::env::var("FAIRWAY_LISTEN_ADDR")
            && !addr.is_empty()
        {
            config.listen_addr = addr;
        }
        if let Ok(val) = std::env::var("FAIRWAY_MAX_ROUNDS")
            && let Ok(n) = val.parse::<usize>()
        {
            config.limits.max_rounds = n;
        }
        if let Ok(val) = std::env::var("FAIRWAY_MAX_DOTS")
            && let Ok(n) = val.parse::<u32>()
        {
            config.limits.max_dots = n;
        }
        if let Ok(val) = std::env::var("FAIRWAY_ROUND_IDLE_TIMEOUT")
            && let Ok(n) = val.parse::<u64>()
        {
            config.rounds.idle_timeout_secs = n;
        }
        if std::env::var("FAIRWAY_BANKER_CONFIG").is_ok() {
            config.banker = BankerRules::load();
        }

        config
    }
}
