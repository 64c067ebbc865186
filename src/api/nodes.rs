use actix_web::{HttpResponse, get, post, web};
use log::info;

use super::error::ApiError;
use super::models::{AppState, ConnectRequest, ConnectResponse, ResolveResponse};
use crate::error::FetchError;
use crate::network::{ConsensusResolver, HttpChainFetcher};

/// Register peers. Either every address is accepted or none is.
#[post("/connect_node")]
pub async fn connect_node(
    state: web::Data<AppState>,
    body: web::Json<ConnectRequest>,
) -> Result<HttpResponse, ApiError> {
    let nodes = body
        .into_inner()
        .nodes
        .ok_or_else(|| ApiError::BadRequest("No nodes".to_string()))?;

    let mut registry = state.registry.lock().expect("mutex poisoned");
    let added = registry.add_all(nodes.iter().map(String::as_str))?;
    info!(
        "POST /connect_node - {} new peer(s), {} known",
        added,
        registry.len()
    );

    Ok(HttpResponse::Ok().json(ConnectResponse {
        message: "All the nodes are now connected. The blockchain now contains the following nodes:",
        total_nodes: registry.peers(),
    }))
}

/// Run one consensus pass against every known peer.
#[get("/replace_chain")]
pub async fn replace_chain(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let worker = state.clone();
    let replaced = web::block(move || -> Result<bool, FetchError> {
        // The blocking client has to live on this worker thread.
        let fetcher = HttpChainFetcher::new(&worker.peer_scheme, worker.peer_timeout)?;
        Ok(ConsensusResolver::new(fetcher).resolve(&worker.ledger, &worker.registry))
    })
    .await??;

    let chain = state.ledger.lock().expect("mutex poisoned").chain().to_vec();
    let message = if replaced {
        "The nodes had different chains, so the chain was replaced by the longest one."
    } else {
        "All good. The chain is the largest one."
    };

    Ok(HttpResponse::Ok().json(ResolveResponse {
        message,
        replaced,
        chain,
    }))
}
