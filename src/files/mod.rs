//! # Archivos
//!
//! Todo lo que depende del sistema de archivos: resolver la URL a una
//! ruta, decidir si el cliente ya tiene la versión actual y armar la
//! respuesta con el archivo.

pub mod conditional;
pub mod resolver;
pub mod service;

pub use conditional::is_not_modified;
pub use resolver::{lookup, resolve_path, FileMeta};
pub use service::FileService;
