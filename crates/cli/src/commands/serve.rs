//! `techtide serve` — run the HTTP gateway.

use std::sync::Arc;

use techtide_core::store::UserStore;
use techtide_gateway::GatewayState;

pub async fn run(port: Option<u16>) -> anyhow::Result<()> {
    let ctx = super::build_context().await?;

    let users: Arc<dyn UserStore> = ctx.store.clone();
    let state = Arc::new(GatewayState {
        recommender: ctx.recommender.clone(),
        users,
    });

    let port = port.unwrap_or(ctx.config.gateway.port);
    techtide_gateway::serve(state, &ctx.config.gateway.host, port).await?;
    Ok(())
}
