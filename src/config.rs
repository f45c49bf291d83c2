//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración inmutable del servidor, desde argumentos CLI o
//! variables de entorno. Se pasa por valor a `Server::bind`.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_server --port 8080 --root ./public --date-style utc
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_ROOT=/srv ./file_server
//! ```

use crate::http::DateStyle;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Tamaño por defecto del buffer de lectura del request
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Límite superior aceptado para `--buffer-size`
pub const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Identidad que se envía en el header `Server`
pub fn default_server_name() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Configuración del servidor de archivos
#[derive(Debug, Clone, Parser)]
#[command(name = "file_server")]
#[command(about = "Servidor HTTP/1.1 de archivos estáticos, una conexión a la vez")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value_t = 80, env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz desde donde se sirven los archivos
    #[arg(short, long = "root", default_value = ".", env = "HTTP_ROOT")]
    pub root_dir: PathBuf,

    /// Valor del header `Server`
    #[arg(long, default_value_t = default_server_name(), env = "HTTP_SERVER_NAME")]
    pub server_name: String,

    /// Bytes leídos del socket por request (lo que no cabe se descarta)
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE, env = "HTTP_BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Zona horaria de las fechas HTTP
    #[arg(long, value_enum, default_value_t = DateStyle::Utc, env = "HTTP_DATE_STYLE")]
    pub date_style: DateStyle,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:80");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_size == 0 || self.buffer_size > MAX_BUFFER_SIZE {
            return Err(format!(
                "Buffer size must be between 1 and {} bytes",
                MAX_BUFFER_SIZE
            ));
        }

        if self.server_name.trim().is_empty() {
            return Err("Server name must not be empty".to_string());
        }

        if !self.root_dir.is_dir() {
            return Err(format!(
                "Root directory {} does not exist or is not a directory",
                self.root_dir.display()
            ));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración en el log
    pub fn log_summary(&self) {
        info!("Configuración:");
        info!("   Dirección:   {}", self.address());
        info!("   Raíz:        {}", self.root_dir.display());
        info!("   Server:      {}", self.server_name);
        info!("   Buffer:      {} bytes", self.buffer_size);
        info!("   Fechas:      {:?}", self.date_style);
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 80,
            host: "0.0.0.0".to_string(),
            root_dir: PathBuf::from("."),
            server_name: default_server_name(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            date_style: DateStyle::Utc,
        }
    }
}
