use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

/// Liveness plus a glance at the node: chain height, mempool and peer count.
#[get("/health/")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (length, pending) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        (ledger.len(), ledger.mempool().len())
    };
    let peers = state.registry.lock().expect("mutex poisoned").len();

    HttpResponse::Ok().json(HealthResponse {
        status: "up",
        node_id: &state.reward.sender,
        length,
        pending,
        peers,
    })
}
