//! # Errores del servidor
//! src/error.rs
//!
//! Sólo los errores de arranque son fatales. Los de cada conexión se
//! registran en el log y terminan en un 404 o en cerrar el socket.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo abrir el socket de escucha
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Configuración rechazada por `Config::validate`
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No se pudo instalar el handler de Ctrl-C
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
