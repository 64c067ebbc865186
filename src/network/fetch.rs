use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::blockchain::Block;
use crate::error::FetchError;

/// A peer's answer to `GET /get_chain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// Obtains the full chain of a named peer. Any error means "skip this peer".
pub trait ChainFetcher {
    fn fetch_chain(&self, peer: &str) -> Result<PeerChain, FetchError>;
}

/// Fetches `{scheme}://{peer}/get_chain` over HTTP.
pub struct HttpChainFetcher {
    client: Client,
    scheme: String,
}

impl HttpChainFetcher {
    /// Must be built and dropped outside an async runtime (blocking client).
    pub fn new(scheme: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            scheme: scheme.to_string(),
        })
    }

    fn chain_url(&self, peer: &str) -> String {
        format!("{}://{}/get_chain", self.scheme, peer)
    }
}

impl ChainFetcher for HttpChainFetcher {
    fn fetch_chain(&self, peer: &str) -> Result<PeerChain, FetchError> {
        let url = self.chain_url(peer);
        debug!("FETCH - GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.json::<PeerChain>()
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
