//! # Resolución de URLs a archivos
//! src/files/resolver.rs
//!
//! `/docs/index.html` bajo la raíz `/srv` → `/srv/docs/index.html`.
//!
//! Reglas:
//! - Se descarta `?query` y `#fragment`
//! - Los segmentos vacíos y `.` se ignoran
//! - Un segmento `..` hace que la URL se rechace (404), nunca se sale de
//!   la raíz por texto. Un symlink dentro de la raíz sí se sigue.
//! - Sólo un archivo regular cuenta como encontrado

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Metadatos del archivo que se va a servir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Ruta en disco
    pub path: PathBuf,

    /// Tamaño en bytes (`Content-Length`)
    pub len: u64,

    /// Última modificación (`Last-Modified`)
    pub modified: SystemTime,
}

/// Quita `?query` y `#fragment` de la URL
fn strip_suffixes(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Traduce la URL a una ruta bajo `root`
///
/// Retorna `None` si la URL intenta subir con `..`.
///
/// # Ejemplo
/// ```
/// use file_server::files::resolve_path;
/// use std::path::Path;
///
/// let path = resolve_path(Path::new("/srv"), "/docs/index.html?v=1").unwrap();
/// assert_eq!(path, Path::new("/srv/docs/index.html"));
///
/// assert!(resolve_path(Path::new("/srv"), "/../etc/passwd").is_none());
/// ```
pub fn resolve_path(root: &Path, url: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();

    for segment in strip_suffixes(url).split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                warn!("URL rechazada por contener '..': {}", url);
                return None;
            }
            _ => path.push(segment),
        }
    }

    Some(path)
}

/// Busca el archivo: `None` si no existe o no es un archivo regular
pub fn lookup(root: &Path, url: &str) -> Option<FileMeta> {
    let path = resolve_path(root, url)?;

    let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!("Sin metadatos para {}: {}", path.display(), e);
            return None;
        }
    };

    if !metadata.is_file() {
        debug!("{} no es un archivo regular", path.display());
        return None;
    }

    let modified = match metadata.modified() {
        Ok(modified) => modified,
        Err(e) => {
            warn!("Sin fecha de modificación para {}: {}", path.display(), e);
            return None;
        }
    };

    Some(FileMeta {
        path,
        len: metadata.len(),
        modified,
    })
}
