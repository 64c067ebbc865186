use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, info};

use super::models::{AppState, NewTxRequest, NewTxResponse};

/// Stage a transaction for the next block. Bodies missing `sender`,
/// `receiver` or `amount` never get here (see `json_config`).
#[post("/add_transaction")]
pub async fn add_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        receiver,
        amount,
    } = body.into_inner();
    debug!(
        "POST /add_transaction - {} -> {} ({})",
        sender, receiver, amount
    );

    let (index, pending) = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        let index = ledger.add_transaction(sender, receiver, amount);
        (index, ledger.mempool().len())
    };
    info!(
        "POST /add_transaction - staged for block #{} (mempool size {})",
        index, pending
    );

    HttpResponse::Created().json(NewTxResponse {
        message: format!("This transaction will be added to Block {index}"),
        index,
    })
}
