use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::sync::Mutex;
use std::time::Duration;

use crate::blockchain::{Block, Ledger, MiningReward, ProofOfWork};
use crate::config::Config;
use crate::network::NodeRegistry;

/// Shared node state: the ledger (one lock for seal/add/replace) and the
/// peer registry.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub registry: Mutex<NodeRegistry>,
    pub pow: ProofOfWork,
    pub reward: MiningReward,
    pub peer_scheme: String,
    pub peer_timeout: Duration,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            registry: Mutex::new(NodeRegistry::new()),
            pow: config
                .pow_max_attempts
                .map_or_else(ProofOfWork::unbounded, ProofOfWork::with_max_attempts),
            reward: MiningReward {
                sender: config.node_id.clone(),
                receiver: config.reward_receiver.clone(),
                amount: config.mining_reward,
            },
            peer_scheme: config.peer_scheme.clone(),
            peer_timeout: config.peer_timeout,
        }
    }
}

/* ---------- Health API Models ---------- */

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    pub status: &'static str,
    pub node_id: &'a str,
    pub length: usize,
    pub pending: usize,
    pub peers: usize,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidResponse {
    pub valid: bool,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub block: Block,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub receiver: String,
    pub amount: Number,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct ConnectRequest {
    #[serde(alias = "node")]
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ConnectResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: Vec<Block>,
}
