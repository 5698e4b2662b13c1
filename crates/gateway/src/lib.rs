//! HTTP gateway for techtide.
//!
//! A thin axum layer over the recommendation pipeline: JSON in, JSON out,
//! no business logic of its own. Pipeline degradation surfaces as an
//! advisory `message` field, never as an error status.

pub mod api;

pub use api::{router, GatewayState, SharedState};

use tracing::info;

/// Bind and serve the API until the process is stopped.
pub async fn serve(state: SharedState, host: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("gateway listening on http://{addr}");
    axum::serve(listener, router(state)).await
}
