use log::debug;
use thiserror::Error;

use super::Block;
use super::pow::verify;

/// First defect found while walking a chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainFault {
    #[error("chain has no blocks")]
    Empty,
    #[error("block at position {position} does not link to its predecessor")]
    BrokenLink { position: usize },
    #[error("block at position {position} carries an invalid proof")]
    BadProof { position: usize },
}

/// Walk `chain` from the second block on, checking the link hash and the
/// proof of every block against its predecessor. The first block is the
/// trusted root and is not checked. Stops at the first defect.
pub fn check_chain(chain: &[Block]) -> Result<(), ChainFault> {
    if chain.is_empty() {
        return Err(ChainFault::Empty);
    }

    for (position, pair) in chain.windows(2).enumerate() {
        let (prev, current) = (&pair[0], &pair[1]);
        let position = position + 1;

        if current.previous_hash != prev.fingerprint() {
            return Err(ChainFault::BrokenLink { position });
        }
        if !verify(current.proof, prev.proof) {
            return Err(ChainFault::BadProof { position });
        }
    }

    Ok(())
}

pub fn is_valid_chain(chain: &[Block]) -> bool {
    match check_chain(chain) {
        Ok(()) => true,
        Err(fault) => {
            debug!("VALIDATE - rejected chain of {} blocks: {}", chain.len(), fault);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChainFault, check_chain, is_valid_chain};
    use crate::blockchain::test_support::mined_chain;
    use crate::blockchain::{Block, ProofOfWork};
    use std::sync::atomic::AtomicBool;

    #[test]
    fn freshly_mined_chain_is_valid() {
        let chain = mined_chain(4);
        assert_eq!(check_chain(&chain), Ok(()));
        assert!(is_valid_chain(&chain));
    }

    #[test]
    fn genesis_alone_is_valid() {
        assert!(is_valid_chain(&[Block::genesis()]));
    }

    #[test]
    fn root_is_trusted_as_is() {
        let mut root = Block::genesis();
        root.proof = 999;
        root.previous_hash = "whatever".into();
        assert!(is_valid_chain(&[root]));
    }

    #[test]
    fn odd_root_with_a_sealed_successor_is_valid() {
        let mut root = Block::genesis();
        root.proof = 999;
        root.previous_hash = "whatever".into();

        let go = AtomicBool::new(false);
        let proof = ProofOfWork::unbounded().solve(root.proof, &go).unwrap();
        let next = Block::new(2, proof, root.fingerprint(), Vec::new());

        assert_eq!(check_chain(&[root, next]), Ok(()));
    }

    #[test]
    fn tampering_a_sealed_root_breaks_its_successor() {
        let mut chain = mined_chain(1);
        chain[0].previous_hash = "whatever".into();
        assert_eq!(
            check_chain(&chain),
            Err(ChainFault::BrokenLink { position: 1 })
        );
    }

    #[test]
    fn empty_chain_is_rejected() {
        assert_eq!(check_chain(&[]), Err(ChainFault::Empty));
    }

    #[test]
    fn tampered_previous_hash_is_rejected() {
        let mut chain = mined_chain(3);
        chain[2].previous_hash = "0".repeat(64);
        assert_eq!(
            check_chain(&chain),
            Err(ChainFault::BrokenLink { position: 2 })
        );
    }

    #[test]
    fn tampered_proof_is_rejected() {
        let mut chain = mined_chain(3);
        chain[3].proof += 1;
        assert_eq!(check_chain(&chain), Err(ChainFault::BadProof { position: 3 }));
    }

    #[test]
    fn tampered_contents_break_the_next_link() {
        let mut chain = mined_chain(3);
        chain[1].transactions[0].amount = 1_000_000.into();
        assert_eq!(
            check_chain(&chain),
            Err(ChainFault::BrokenLink { position: 2 })
        );
    }
}
