use log::{debug, info};
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;

use super::pow::ProofSearch;
use super::{Block, Ledger};
use crate::error::PowError;

/// Transaction credited to the miner in every block it seals.
#[derive(Debug, Clone)]
pub struct MiningReward {
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
}

/// Mine one block on top of the ledger's current tip:
/// - Snapshot the tip (proof + fingerprint) under the lock
/// - Search for the next proof with the lock released
/// - Re-lock; if the tip moved meanwhile, start over on the new tip
/// - Stage the reward transaction and seal the mempool into a block
pub fn mine_block(
    ledger: &Mutex<Ledger>,
    pow: &impl ProofSearch,
    reward: &MiningReward,
    cancel: &AtomicBool,
) -> Result<Block, PowError> {
    loop {
        let (previous_proof, previous_hash) = {
            let ledger = ledger.lock().expect("mutex poisoned");
            let tip = ledger.latest();
            (tip.proof, tip.fingerprint())
        };

        let proof = pow.solve(previous_proof, cancel)?;

        let mut ledger = ledger.lock().expect("mutex poisoned");
        if ledger.latest().fingerprint() != previous_hash {
            debug!("MINER - tip moved while solving, retrying on the new tip");
            continue;
        }

        ledger.add_transaction(reward.sender.clone(), reward.receiver.clone(), reward.amount);
        let block = ledger.seal(proof, previous_hash).clone();
        info!(
            "MINER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        return Ok(block);
    }
}
