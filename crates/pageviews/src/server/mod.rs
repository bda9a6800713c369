mod cli;
mod routes;

pub use cli::ServeOptions;
pub use routes::{router, AppState};

use crate::client::PageviewsClient;
use crate::prelude::{eprintln, println, *};

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let client = PageviewsClient::from_global(&global)?;

    if global.verbose {
        eprintln!(
            "Starting pageviews server on {}:{}...",
            options.host, options.port
        );
        eprintln!("Pageviews API Base: {}", client.api_base());
    }

    let addr = f!("{}:{}", options.host, options.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    println!("Server running on port {}", options.port);
    log::info!("Listening on http://{}", addr);

    axum::serve(listener, router(AppState::new(client)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    log::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C, running until killed: {e}");
        std::future::pending::<()>().await;
    }
}
