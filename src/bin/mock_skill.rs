//! Standalone mock skill server
//!
//! Serves the default greeting handler until interrupted, for poking at a
//! test setup by hand.

use alice_tester::mock_server::MockSkillServer;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alice_tester=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let port: u16 = std::env::var("MOCK_SKILL_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let server = MockSkillServer::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    tracing::info!(url = %server.url(), "mock skill ready, Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    Ok(())
}
