//! # File Server - Entry Point
//! src/main.rs
//!
//! Parsea la configuración, instala el logging y el handler de Ctrl-C,
//! y corre el loop hasta que llegue una señal.

use file_server::config::Config;
use file_server::server::Server;
use file_server::Result;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("No se pudo instalar el subscriber de tracing: {}", e);
    }
}

fn start(config: Config) -> Result<()> {
    config.log_summary();

    let server = Server::bind(config)?;

    let shutdown = server.shutdown_handle();
    ctrlc::set_handler(move || {
        info!("Señal de interrupción recibida, apagando...");
        shutdown.trigger();
    })?;

    server.run();
    Ok(())
}

fn main() {
    init_tracing();

    let config = Config::new();

    if let Err(e) = start(config) {
        error!("Error fatal: {}", e);
        std::process::exit(1);
    }
}
