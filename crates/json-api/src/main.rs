//! Subscriptions JSON API Server

use std::process;

use salvo::prelude::*;
use tracing::{error, info};

use subs_app::context::AppContext;

use crate::{config::Settings, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod config;
mod deadline;
mod errors;
mod extensions;
mod healthcheck;
mod observability;
mod router;
mod shutdown;
mod state;
mod subscriptions;
#[cfg(test)]
mod test_helpers;

/// Subscriptions JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let settings = Settings::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&settings.log) {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber failed to install, so tracing has nowhere to write"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        process::exit(1);
    }

    let app = match AppContext::connect(&settings.postgres.pool_settings()).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let addr = settings.http.socket_addr();

    let acceptor = match TcpListener::new(addr.clone()).try_bind().await {
        Ok(acceptor) => acceptor,
        Err(bind_error) => {
            error!("failed to bind {addr}: {bind_error}");

            app.close().await;

            process::exit(1);
        }
    };

    info!(
        %addr,
        read_timeout_seconds = settings.http.read_timeout_seconds,
        write_timeout_seconds = settings.http.write_timeout_seconds,
        idle_timeout_seconds = settings.http.idle_timeout().as_secs(),
        "listening"
    );

    let write_timeout = settings.http.write_timeout();

    let router = router::app_router(
        State::shared(app.clone(), settings.http.read_timeout()),
        write_timeout,
    );

    let server = Server::new(acceptor);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, write_timeout).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    app.close().await;

    info!("server stopped");
}
