use log::debug;
use serde_json::Number;

use super::Block;
use super::validation::is_valid_chain;
use crate::transaction::{Mempool, Transaction};

/// In-memory chain of blocks plus the mempool feeding the next one.
///
/// Never empty: the genesis block is pushed on construction and a
/// replacement chain always comes from consensus after validation.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    mempool: Mempool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger with a genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            mempool: Mempool::new(),
        }
    }

    /// Return the last block in the chain.
    pub fn latest(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    /// Seal the whole mempool into a new block and append it.
    ///
    /// The caller supplies a proof that already satisfies the puzzle; it is
    /// not checked again here.
    pub fn seal(&mut self, proof: u64, previous_hash: String) -> &Block {
        let index = self.chain.len() as u64 + 1;
        let transactions = self.mempool.take_all();
        debug!(
            "LEDGER - sealing block #{} with {} txs (proof={})",
            index,
            transactions.len(),
            proof
        );

        self.chain
            .push(Block::new(index, proof, previous_hash, transactions));
        self.latest()
    }

    /// Stage a transaction; returns the index of the block that will hold it.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        receiver: impl Into<String>,
        amount: impl Into<Number>,
    ) -> u64 {
        self.mempool
            .push(Transaction::new(sender, receiver, amount));
        self.latest().index + 1
    }

    /// Drop the current chain and adopt `chain` wholesale. The mempool is
    /// left untouched.
    pub fn replace(&mut self, chain: Vec<Block>) {
        debug_assert!(!chain.is_empty(), "replacement chain must not be empty");
        debug!(
            "LEDGER - replacing chain: {} -> {} blocks",
            self.chain.len(),
            chain.len()
        );
        self.chain = chain;
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn mempool(&self) -> &Mempool {
        &self.mempool
    }

    /// Validate the ledger's own chain.
    pub fn is_valid_chain(&self) -> bool {
        is_valid_chain(&self.chain)
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::Block;
    use crate::blockchain::test_support::{mined_chain, seal_next};
    use crate::transaction::Transaction;

    #[test]
    fn starts_with_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.latest().index, 1);
        assert_eq!(ledger.latest().proof, 1);
        assert_eq!(ledger.latest().previous_hash, "0");
        assert!(ledger.mempool().is_empty());
    }

    #[test]
    fn add_transaction_points_at_next_block() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.add_transaction("A", "B", 10), 2);
        assert_eq!(ledger.add_transaction("B", "C", 3), 2);
        assert_eq!(ledger.mempool().len(), 2);

        seal_next(&mut ledger);
        assert_eq!(ledger.add_transaction("C", "D", 1), 3);
    }

    #[test]
    fn seal_drains_mempool_in_order() {
        let mut ledger = Ledger::new();
        ledger.add_transaction("A", "B", 10);
        ledger.add_transaction("B", "C", 3);
        let staged: Vec<Transaction> = ledger.mempool().iter().cloned().collect();

        let prev_hash = ledger.latest().fingerprint();
        let block = ledger.seal(533, prev_hash.clone()).clone();

        assert!(ledger.mempool().is_empty());
        assert_eq!(block.transactions, staged);
        assert_eq!(block.index, 2);
        assert_eq!(block.proof, 533);
        assert_eq!(block.previous_hash, prev_hash);
        assert_eq!(ledger.latest(), &block);
    }

    #[test]
    fn indices_follow_positions() {
        let mut ledger = Ledger::new();
        for _ in 0..3 {
            seal_next(&mut ledger);
        }
        for (i, block) in ledger.chain().iter().enumerate() {
            assert_eq!(block.index, i as u64 + 1);
        }
        assert!(ledger.is_valid_chain());
    }

    #[test]
    fn replace_swaps_chain_but_keeps_mempool() {
        let mut ledger = Ledger::new();
        ledger.add_transaction("A", "B", 10);

        let other = mined_chain(2);
        ledger.replace(other.clone());

        assert_eq!(ledger.chain(), other.as_slice());
        assert_eq!(ledger.mempool().len(), 1);
        assert_eq!(ledger.add_transaction("B", "C", 1), 4);
    }

    #[test]
    fn sealed_blocks_link_to_genesis() {
        let mut ledger = Ledger::new();
        let genesis: Block = ledger.latest().clone();
        seal_next(&mut ledger);
        assert_eq!(ledger.chain()[1].previous_hash, genesis.fingerprint());
    }
}
