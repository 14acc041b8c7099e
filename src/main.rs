use axum::{routing::get, Router};
use dotenvy::dotenv;
use std::{env, net::SocketAddr, sync::Arc};
use anyhow::Result;

mod engine;
mod models;
mod routes;
mod storage;

use storage::Store;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let store = Arc::new(Store::new());

    let app = Router::new()
        .merge(routes::entries::routes(store.clone()))
        .merge(routes::predictions::routes(store.clone()))
        .merge(routes::summary::routes(store.clone()))
        .merge(routes::calendar::routes(store.clone()))
        .route("/health", get(|| async { "✅ Backend up" }));

    let port = env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3060);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🩸 Server running at {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
