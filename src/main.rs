mod config;
mod entities;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod seeders;
mod services;
mod utils;

use config::{AppState, Config};
use dotenvy::dotenv;
use sea_orm::Database;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt::init();

    let cfg = Config::init();
    println!("🚀 Starting Newsdesk backend...");

    // 1. Database connection
    println!("📡 Connecting to database...");
    let db = Database::connect(&cfg.database_url)
        .await
        .expect("🔥 Failed to connect to database!");
    println!("✅ Database connected!");

    // 2. Database seeding
    println!("🌱 Running seeders...");
    if let Err(e) = seeders::run_seeders(&db).await {
        tracing::error!("❌ Seeding failed: {}", e);
    } else {
        println!("✅ Seeding successful!");
    }

    // 3. Build app state
    let state = AppState { db: Arc::new(db) };

    // 4. Initialize router
    let app = routes::create_routes(state.clone()).with_state(state);

    // 5. Start server
    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");

    println!("🎯 Server ready! Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
