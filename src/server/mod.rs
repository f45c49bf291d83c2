//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta una conexión
//! 3. Lee el request y envía la respuesta
//! 4. Cierra la conexión y vuelve al paso 2
//!
//! Una conexión a la vez, sin threads de trabajo.

pub mod shutdown;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use shutdown::ShutdownHandle;
pub use tcp::{handle_connection, Server};
