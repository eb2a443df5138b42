use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

use classroom::config::{BackendKind, Config};
use classroom::database::{Backend, MemoryBackend, PgBackend};
use classroom::{AppState, router};

#[tokio::main]
async fn main() {
    let config = Config::load();

    // Begin logging
    let level = config.as_ref().map(Config::level).unwrap_or(tracing::Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not install logger: {e}");
    }

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    let addr = match config.bind.parse::<SocketAddr>() {
        Ok(a) => a,
        Err(e) => {
            error!("Invalid bind address {:?}: {e}", config.bind);
            return;
        }
    };

    // Initialize the backend, aborting start-up if an error occurs
    let backend: Arc<dyn Backend> = match config.backend {
        BackendKind::Postgres => match PgBackend::connect(&config.database).await {
            Ok(b) => Arc::new(b),
            Err(e) => {
                error!("{e}");
                return;
            }
        },
        BackendKind::Memory => {
            warn!("Using the in-memory backend, nothing survives a restart");
            Arc::new(MemoryBackend::new())
        }
    };

    info!("Backend initialized");

    let app = router(AppState::new(backend).with_search_limit(config.search_limit));

    let served = match &config.tls {
        Some(tls) => {
            // Several providers may be compiled in, so pick one explicitly
            let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

            let tls_config = match RustlsConfig::from_pem_file(&tls.cert, &tls.key).await {
                Ok(c) => c,
                Err(e) => {
                    error!("Could not load TLS certificate: {e}");
                    return;
                }
            };

            info!("Serving HTTPS on {addr}");
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await
        }
        None => {
            info!("Serving HTTP on {addr}");
            axum_server::bind(addr).serve(app.into_make_service()).await
        }
    };

    if let Err(e) = served {
        error!("Server stopped: {e}");
    }
}
