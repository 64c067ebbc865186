use log::{debug, info, warn};
use std::sync::Mutex;
use std::thread;

use super::fetch::{ChainFetcher, PeerChain};
use super::registry::NodeRegistry;
use crate::blockchain::{Block, Ledger, is_valid_chain};

/// Longest-valid-chain resolution against every registered peer.
pub struct ConsensusResolver<F> {
    fetcher: F,
}

impl<F> ConsensusResolver<F>
where
    F: ChainFetcher + Sync,
{
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// One pass over the known peers. Returns `true` when the local chain
    /// was replaced by a strictly longer valid one.
    ///
    /// Peers are fetched concurrently with no lock held. Only the final
    /// pick-and-swap runs under the ledger lock, against the chain length
    /// at that moment. Among equally long winners the first one in scan
    /// order is kept.
    pub fn resolve(&self, ledger: &Mutex<Ledger>, registry: &Mutex<NodeRegistry>) -> bool {
        let peers = registry.lock().expect("mutex poisoned").peers();
        if peers.is_empty() {
            debug!("CONSENSUS - no peers registered");
            return false;
        }
        let local_len = ledger.lock().expect("mutex poisoned").len();

        let candidates: Vec<(String, Vec<Block>)> = self
            .fetch_all(&peers)
            .into_iter()
            .filter_map(|(peer, reply)| screen(peer, reply, local_len))
            .collect();

        let mut ledger = ledger.lock().expect("mutex poisoned");
        let mut max_length = ledger.len();
        let mut longest: Option<(String, Vec<Block>)> = None;
        for (peer, chain) in candidates {
            // Strict `>`: of equally long chains the first scanned stays, as
            // the reference node does (not the last encountered).
            if chain.len() > max_length {
                max_length = chain.len();
                longest = Some((peer, chain));
            }
        }

        match longest {
            Some((peer, chain)) => {
                info!(
                    "CONSENSUS - adopting chain of {} blocks from {} (local had {})",
                    chain.len(),
                    peer,
                    ledger.len()
                );
                ledger.replace(chain);
                true
            }
            None => {
                debug!("CONSENSUS - local chain of {} blocks kept", ledger.len());
                false
            }
        }
    }

    fn fetch_all<'p>(&self, peers: &'p [String]) -> Vec<(&'p str, PeerChain)> {
        let fetcher = &self.fetcher;
        thread::scope(|scope| {
            let handles: Vec<_> = peers
                .iter()
                .map(|peer| (peer.as_str(), scope.spawn(move || fetcher.fetch_chain(peer))))
                .collect();

            handles
                .into_iter()
                .filter_map(|(peer, handle)| match handle.join() {
                    Ok(Ok(reply)) => Some((peer, reply)),
                    Ok(Err(e)) => {
                        warn!("CONSENSUS - skipping peer {}: {}", peer, e);
                        None
                    }
                    Err(_) => {
                        warn!("CONSENSUS - skipping peer {}: fetch panicked", peer);
                        None
                    }
                })
                .collect()
        })
    }
}

/// Keep a reply only if it is self-consistent, longer than `local_len`
/// and valid.
fn screen(peer: &str, reply: PeerChain, local_len: usize) -> Option<(String, Vec<Block>)> {
    if reply.length != reply.chain.len() {
        warn!(
            "CONSENSUS - skipping peer {}: reports length {} but sent {} blocks",
            peer,
            reply.length,
            reply.chain.len()
        );
        return None;
    }
    if reply.length <= local_len {
        debug!(
            "CONSENSUS - peer {} has {} blocks, not longer than {}",
            peer, reply.length, local_len
        );
        return None;
    }
    if !is_valid_chain(&reply.chain) {
        warn!("CONSENSUS - skipping peer {}: chain failed validation", peer);
        return None;
    }
    Some((peer.to_string(), reply.chain))
}
