use thiserror::Error;

/// Outcomes of a proof-of-work search that did not find a proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowError {
    #[error("proof-of-work search cancelled")]
    Cancelled,
    #[error("proof-of-work search exhausted after {attempts} attempts")]
    Exhausted { attempts: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid node address '{0}': expected host:port or a URL with one")]
    InvalidAddress(String),
}

/// Why a peer's chain could not be obtained. Always means "skip this peer".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to peer failed: {0}")]
    Transport(String),
    #[error("peer answered with status {0}")]
    Status(u16),
    #[error("peer sent an undecodable chain: {0}")]
    Decode(String),
}
