use std::sync::atomic::AtomicBool;

use super::{Block, Ledger, ProofOfWork};

/// Solve the puzzle for the ledger's tip and seal one block carrying a
/// single filler transaction.
pub fn seal_next(ledger: &mut Ledger) -> Block {
    let tip = ledger.latest();
    let (previous_proof, previous_hash) = (tip.proof, tip.fingerprint());
    let proof = ProofOfWork::unbounded()
        .solve(previous_proof, &AtomicBool::new(false))
        .expect("unbounded search");

    let amount = ledger.len() as u64;
    ledger.add_transaction("alice", "bob", amount);
    ledger.seal(proof, previous_hash).clone()
}

/// Genesis plus `blocks` valid mined blocks.
pub fn mined_chain(blocks: usize) -> Vec<Block> {
    let mut ledger = Ledger::new();
    for _ in 0..blocks {
        seal_next(&mut ledger);
    }
    ledger.chain().to_vec()
}
