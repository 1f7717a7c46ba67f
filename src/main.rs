//! isoserve: a static-file HTTP server that stamps three cross-origin
//! isolation headers onto every response.
//!
//! Usage: `isoserve [PORT]` — one optional positional argument, the
//! listening port (default 8000). Files are served from the configured
//! root, by default the working directory.

use std::sync::Arc;

mod config;
mod handler;
mod http;
mod isolation;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The port argument is validated before anything binds; a bad value is
    // a fatal startup error, never a silent fallback
    let port_arg = std::env::args().nth(1);
    let port_override = config::port_override(port_arg.as_deref())?;

    let mut cfg = config::Config::load()?;
    if let Some(port) = port_override {
        cfg.server.port = port;
    }

    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(config::AppState::new(cfg));
    logger::log_server_start(&addr, &state.config);

    server::run(listener, state).await;
    Ok(())
}
