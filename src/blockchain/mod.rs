pub mod block;
pub mod miner;
pub mod model;
pub mod pow;
pub mod validation;

#[cfg(test)]
pub mod test_support;

pub use block::Block;
pub use miner::{MiningReward, mine_block};
pub use model::Ledger;
pub use pow::ProofOfWork;
pub use validation::is_valid_chain;

/// Amount credited to the miner of each block.
pub const DEFAULT_MINING_REWARD: u64 = 1;

/// Receiver recorded on the reward transaction.
pub const DEFAULT_REWARD_RECEIVER: &str = "miner";
