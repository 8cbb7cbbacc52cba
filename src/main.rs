//! # Web Worker - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos.
//! Nivel de log vía `RUST_LOG` (por defecto `info`).

use tracing::error;
use tracing_subscriber::EnvFilter;
use web_worker::config::Config;
use web_worker::server::Server;
use web_worker::ServerError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Crear configuración (CLI + env)
    let config = Config::new();

    if let Err(e) = run(config) {
        error!("fatal error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), ServerError> {
    config.validate()?;
    config.print_summary();

    // Iniciar el servidor (esto bloqueará el thread)
    Server::bind(&config)?.run()
}
