mod chain;
pub mod error;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::ServiceConfig;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(error::json_config())
        .service(health::health_check)
        .service(chain::get_chain)
        .service(chain::is_valid)
        .service(chain::mine)
        .service(tx::add_transaction)
        .service(nodes::connect_node)
        .service(nodes::replace_chain);
}
