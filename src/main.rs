//! Finance News Digest — Binary Entrypoint
//! Boots the Axum HTTP server serving `GET /api/news`.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // No-op if the runtime already installed a subscriber.
    finance_news_digest::init_tracing();

    let router = finance_news_digest::app().await?;
    Ok(router.into())
}
