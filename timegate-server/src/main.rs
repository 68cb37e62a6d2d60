use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper::Server;
use hyper::service::{make_service_fn, service_fn};
use timegate_core::serve::get_config;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod gateway;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = get_config();
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.server.host, config.server.port))?;

    let make_svc = make_service_fn(move |_conn| async move {
        Ok::<_, hyper::Error>(service_fn(move |req| gateway::handle_request(config, req)))
    });
    let server = Server::bind(&addr).serve(make_svc);
    info!("Starting CGI gateway on http://{}", server.local_addr());
    server.await.context("Server error")?;
    Ok(())
}
