mod api;
mod blockchain;
mod config;
mod error;
mod network;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env();
    println!(
        "⛓️ Starting BatCoin node {} at http://{}:{}",
        config.node_id, config.host, config.port
    );
    info!(
        "pow attempt cap: {:?}, peer fetch: {}:// with {:?} timeout",
        config.pow_max_attempts, config.peer_scheme, config.peer_timeout
    );

    let state = web::Data::new(AppState::from_config(&config));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
