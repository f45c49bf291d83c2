//! # Módulo HTTP
//!
//! Lo mínimo del protocolo que necesita un servidor de archivos:
//!
//! - Parsing de la request line y los headers
//! - Construcción de respuestas con headers ordenados
//! - Los tres status codes que se emiten (200, 304, 404)
//! - Formato de fechas HTTP
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! If-Modified-Since: Sat, 21 Dec 2024 14:00:00 GMT\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 304 Not Modified\r\n
//! Content-Type: text/html\r\n
//! Connection: close\r\n
//! Server: file_server/0.1.0\r\n
//! Date: Sat, 21 Dec 2024 14:05:00 GMT\r\n
//! \r\n
//! ```

pub mod date;
pub mod request;
pub mod response;
pub mod status;

pub use date::DateStyle;
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
