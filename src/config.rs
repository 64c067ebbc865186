use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::blockchain::{DEFAULT_MINING_REWARD, DEFAULT_REWARD_RECEIVER};

/// Node settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Sender recorded on this node's mining rewards.
    pub node_id: String,
    pub reward_receiver: String,
    pub mining_reward: u64,
    /// `None` searches until a proof is found or the request goes away.
    pub pow_max_attempts: Option<u64>,
    pub peer_scheme: String,
    pub peer_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_attempts: u64 = parse_or(&lookup, "POW_MAX_ATTEMPTS", 0);
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 5000),
            node_id: lookup("NODE_ID").unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
            reward_receiver: lookup("REWARD_RECEIVER")
                .unwrap_or_else(|| DEFAULT_REWARD_RECEIVER.to_string()),
            mining_reward: parse_or(&lookup, "MINING_REWARD", DEFAULT_MINING_REWARD),
            pow_max_attempts: (max_attempts > 0).then_some(max_attempts),
            peer_scheme: lookup("PEER_SCHEME").unwrap_or_else(|| "http".to_string()),
            peer_timeout: Duration::from_secs(parse_or(&lookup, "PEER_TIMEOUT_SECS", 10)),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("CONFIG - {}={:?} is not valid, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.node_id.len(), 32);
        assert!(!cfg.node_id.contains('-'));
        assert_eq!(cfg.reward_receiver, "miner");
        assert_eq!(cfg.mining_reward, 1);
        assert_eq!(cfg.pow_max_attempts, None);
        assert_eq!(cfg.peer_scheme, "http");
        assert_eq!(cfg.peer_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_and_bad_values() {
        let cfg = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "5001"),
            ("NODE_ID", "node-a"),
            ("POW_MAX_ATTEMPTS", "1000000"),
            ("PEER_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5001);
        assert_eq!(cfg.node_id, "node-a");
        assert_eq!(cfg.pow_max_attempts, Some(1_000_000));
        assert_eq!(cfg.peer_timeout, Duration::from_secs(10));
    }
}
