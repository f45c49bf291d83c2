//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Una respuesta es: status + lista ordenada de headers + body opcional.
//! El body, cuando existe, es un archivo abierto que se copia al socket
//! en bloques de [`CHUNK_SIZE`] bytes.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Connection: close\r\n
//! Content-Length: 10\r\n
//! \r\n
//! <bytes del archivo>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use file_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::NotFound)
//!     .with_header("Content-Type", "text/html")
//!     .with_header("Connection", "close");
//!
//! let mut out = Vec::new();
//! response.write_to(&mut out).unwrap();
//! assert!(out.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
//! ```

use super::StatusCode;
use std::fs::File;
use std::io::{self, Read, Write};

/// Tamaño de cada bloque copiado del archivo al socket
pub const CHUNK_SIZE: usize = 1024;

/// Versión que se anuncia en la status line
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Representa una respuesta HTTP completa
#[derive(Debug)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Headers en el orden en que se escriben
    headers: Vec<(String, String)>,

    /// Archivo a enviar como body
    body: Option<File>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Agrega un header al final de la lista
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header (versión mutable)
    ///
    /// Si ya existe un header con ese nombre se reemplaza su valor
    /// conservando la posición original.
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Usa un archivo abierto como body
    ///
    /// El `Content-Length` lo agrega quien construye la respuesta, porque
    /// sale de los metadatos ya leídos.
    pub fn with_file_body(mut self, file: File) -> Self {
        self.body = Some(file);
        self
    }

    /// Descarta el body pero conserva los headers (para HEAD)
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Status line + headers + línea vacía
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        result.extend_from_slice(format!("{} {}\r\n", HTTP_VERSION, self.status).as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        result
    }

    /// Escribe la respuesta completa y retorna los bytes de body enviados
    ///
    /// Consume la respuesta: el archivo se cierra al terminar. Si el
    /// status no admite body (304, 404) sólo se envían los headers.
    pub fn write_to<W: Write>(self, writer: &mut W) -> io::Result<u64> {
        writer.write_all(&self.head_bytes())?;

        let sent = match self.body {
            Some(file) if self.status.allows_body() => copy_in_chunks(file, writer)?,
            _ => 0,
        };

        writer.flush()?;
        Ok(sent)
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Busca un header sin distinguir mayúsculas/minúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Indica si la respuesta lleva body
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Copia `reader` en `writer` en bloques de [`CHUNK_SIZE`] bytes, en orden
pub fn copy_in_chunks<R: Read, W: Write>(mut reader: R, writer: &mut W) -> io::Result<u64> {
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&chunk[..n])?;
        total += n as u64;
    }

    Ok(total)
}
