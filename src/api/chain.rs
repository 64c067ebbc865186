use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::ApiError;
use super::models::{AppState, ChainResponse, MineResponse, ValidResponse};
use crate::blockchain::mine_block;

/// Raises the flag when dropped, so a search whose client went away stops.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Get the full blockchain.
#[get("/get_chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    })
}

/// Validate the whole chain.
#[get("/is_valid")]
pub async fn is_valid(state: web::Data<AppState>) -> impl Responder {
    let valid = state.ledger.lock().expect("mutex poisoned").is_valid_chain();
    let message = if valid {
        "All good. The blockchain is valid."
    } else {
        "Sorry, the blockchain is invalid"
    };
    HttpResponse::Ok().json(ValidResponse { valid, message })
}

/// Mine a new block from the current mempool:
/// - Solve the proof of work for the current tip on a blocking worker
/// - Add this node's reward transaction
/// - Seal the mempool into the block
#[get("/mine_block")]
pub async fn mine(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let _guard = CancelOnDrop(cancel.clone());
    debug!("MINER - request received, starting search");

    let worker = state.clone();
    let block = web::block(move || {
        mine_block(&worker.ledger, &worker.pow, &worker.reward, &cancel)
    })
    .await??;

    info!("MINER - block #{} served to client", block.index);
    Ok(HttpResponse::Ok().json(MineResponse {
        message: "Congratulations, you just mined a block!",
        block,
    }))
}
