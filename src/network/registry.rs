use actix_web::http::Uri;
use std::collections::HashSet;

use crate::error::RegistryError;

/// Reduce an address to its `host:port` authority, so
/// `http://127.0.0.1:5001/` and `127.0.0.1:5001` name the same peer.
pub fn normalize_address(address: &str) -> Result<String, RegistryError> {
    let invalid = || RegistryError::InvalidAddress(address.to_string());

    let uri: Uri = address.trim().parse().map_err(|_| invalid())?;
    uri.authority()
        .map(|authority| authority.as_str().to_string())
        .filter(|authority| !authority.is_empty())
        .ok_or_else(invalid)
}

/// Known peers, deduplicated by authority.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    peers: HashSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            peers: HashSet::new(),
        }
    }

    /// Register one peer. Returns `false` when it was already known.
    pub fn add(&mut self, address: &str) -> Result<bool, RegistryError> {
        let authority = normalize_address(address)?;
        Ok(self.peers.insert(authority))
    }

    /// Register every address, or none of them if any is malformed.
    pub fn add_all<'a, I>(&mut self, addresses: I) -> Result<usize, RegistryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let normalized = addresses
            .into_iter()
            .map(normalize_address)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(normalized
            .into_iter()
            .filter(|authority| self.peers.insert(authority.clone()))
            .count())
    }

    /// Snapshot of the known peers, sorted for stable output.
    pub fn peers(&self) -> Vec<String> {
        let mut peers: Vec<String> = self.peers.iter().cloned().collect();
        peers.sort();
        peers
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
