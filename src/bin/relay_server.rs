// src/bin/relay_server.rs
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;

use quote_relay::config::Config;
use quote_relay::server::{batch_update, cors_handler, health_check, stock_info, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env().expect("Missing config");
    let state = web::Data::new(AppState::new(config.clone()).expect("Failed to build upstream client"));
    let bind_address = format!("0.0.0.0:{}", config.port);

    println!("🚀 quote-relay server running on http://{}", bind_address);
    println!("📋 Available endpoints:");
    println!("  • GET  /api/stock-info   - Quote lookup (?symbol=&market=)");
    println!("  • POST /api/batch-update - Batch quote refresh");
    println!("  • GET  /health           - Health check");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .route("/api/stock-info", web::get().to(stock_info))
            .route("/api/batch-update", web::post().to(batch_update))
            .route("/health", web::get().to(health_check))
            .default_service(web::to(cors_handler))
    })
    .bind(&bind_address)?
    .run()
    .await
}
