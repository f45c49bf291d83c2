//! # Servicio de archivos
//! src/files/service.rs
//!
//! Traduce los bytes de un request en una [`Response`]:
//!
//! ```text
//! bytes → Request → ruta → ¿existe? → ¿modificado? → 200 / 304 / 404
//! ```
//!
//! Nunca falla: cualquier problema del request o del archivo termina en
//! un 404.

use super::conditional::is_not_modified;
use super::resolver::{lookup, FileMeta};
use crate::config::Config;
use crate::http::{DateStyle, Request, Response, StatusCode};
use std::fs::File;
use std::path::PathBuf;
use tracing::{info, warn};

/// Content-Type cuando la extensión no dice nada
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content-Type de las respuestas sin body (404 y 304)
const STATUS_CONTENT_TYPE: &str = "text/html";

/// Adivina el Content-Type por la extensión del archivo
pub fn content_type_for(path: &std::path::Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}

/// Arma respuestas para los archivos bajo un directorio raíz
#[derive(Debug, Clone)]
pub struct FileService {
    root_dir: PathBuf,
    server_name: String,
    date_style: DateStyle,
}

impl FileService {
    pub fn new(root_dir: PathBuf, server_name: String, date_style: DateStyle) -> Self {
        Self {
            root_dir,
            server_name,
            date_style,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.root_dir.clone(),
            config.server_name.clone(),
            config.date_style,
        )
    }

    /// Procesa los bytes crudos de un request
    pub fn respond(&self, raw: &[u8]) -> Response {
        match Request::parse(raw) {
            Ok(request) => {
                info!(
                    "{} {} {}",
                    request.method(),
                    request.url(),
                    request.version()
                );
                self.respond_to(&request)
            }
            Err(e) => {
                warn!("Request inválido: {}", e);
                self.not_found()
            }
        }
    }

    /// Procesa un request ya parseado
    pub fn respond_to(&self, request: &Request) -> Response {
        let Some(meta) = lookup(&self.root_dir, request.url()) else {
            return self.not_found();
        };

        if is_not_modified(request, meta.modified, self.date_style) {
            return self.not_modified();
        }

        let response = self.file_response(&meta);
        if request.is_head() {
            response.without_body()
        } else {
            response
        }
    }

    /// 404 Not Found, sin body
    pub fn not_found(&self) -> Response {
        self.status_only(StatusCode::NotFound)
    }

    /// 304 Not Modified, sin body
    pub fn not_modified(&self) -> Response {
        self.status_only(StatusCode::NotModified)
    }

    fn status_only(&self, status: StatusCode) -> Response {
        Response::new(status)
            .with_header("Content-Type", STATUS_CONTENT_TYPE)
            .with_header("Connection", "close")
            .with_header("Server", &self.server_name)
            .with_header("Date", &self.date_style.now())
    }

    /// 200 OK con el archivo como body
    ///
    /// Si el archivo desaparece entre el stat y el open se responde 404.
    fn file_response(&self, meta: &FileMeta) -> Response {
        let file = match File::open(&meta.path) {
            Ok(file) => file,
            Err(e) => {
                warn!("No se pudo abrir {}: {}", meta.path.display(), e);
                return self.not_found();
            }
        };

        Response::new(StatusCode::Ok)
            .with_header("Connection", "close")
            .with_header("Date", &self.date_style.now())
            .with_header("Server", &self.server_name)
            .with_header("Content-Type", &content_type_for(&meta.path))
            .with_header("Content-Length", &meta.len.to_string())
            .with_header("Last-Modified", &self.date_style.format(meta.modified))
            .with_file_body(file)
    }
}
