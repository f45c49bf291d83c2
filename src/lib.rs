//! # File Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 de archivos estáticos, bloqueante y de un solo
//! thread: acepta una conexión, la atiende completa y la cierra.
//!
//! ## Arquitectura
//!
//! - `http`: Parsing del request, respuestas, status codes y fechas
//! - `files`: Resolución de rutas, requests condicionales y armado de respuestas
//! - `server`: Loop de aceptación y apagado ordenado
//! - `config`: Argumentos CLI y variables de entorno
//! - `error`: Errores fatales de arranque
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use file_server::config::Config;
//! use file_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al iniciar servidor");
//! server.run();
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod server;

pub use error::{Result, ServerError};
