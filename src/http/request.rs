//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser mínimo sobre el buffer leído del socket.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost\r\n
//! If-Modified-Since: Thu, 01 Jan 1970 00:00:00 GMT\r\n
//! \r\n
//! ```
//!
//! El buffer tiene tamaño fijo, así que un request más grande llega
//! truncado: los headers que no caben simplemente no se ven.

use std::collections::HashMap;
use thiserror::Error;

/// Errores que pueden ocurrir durante el parsing
///
/// Cualquiera de ellos se responde con 404.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío (el cliente no envió nada)
    #[error("Empty request")]
    EmptyRequest,

    /// La request line no tiene exactamente 3 tokens
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método tal cual llegó (GET, HEAD, ...)
    method: String,

    /// URL de la request line, sin tocar (puede incluir `?query`)
    url: String,

    /// Versión HTTP tal cual llegó
    version: String,

    /// Headers con nombre en minúsculas y valor sin espacios
    headers: HashMap<String, String>,
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use file_server::http::Request;
    ///
    /// let raw = b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.url(), "/index.html");
    /// assert_eq!(request.header("HOST"), Some("localhost"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let text = String::from_utf8_lossy(buffer);
        let mut lines = text.lines();

        let request_line = match lines.next() {
            Some(line) if !line.trim().is_empty() => line,
            _ => return Err(ParseError::EmptyRequest),
        };

        let (method, url, version) = Self::parse_request_line(request_line)?;
        let headers = Self::parse_headers(lines);

        Ok(Request {
            method,
            url,
            version,
            headers,
        })
    }

    /// Formato: `METHOD URL VERSION`
    fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD URL VERSION
        match parts.as_slice() {
            [method, url, version] => Ok((
                method.to_string(),
                url.to_string(),
                version.to_string(),
            )),
            _ => Err(ParseError::InvalidRequestLine(line.to_string())),
        }
    }

    /// Parsea headers hasta la primera línea vacía
    ///
    /// Las líneas sin ':' se ignoran. Sólo se separa en el primer ':'
    /// para que valores como `Host: localhost:8080` queden intactos.
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }

        headers
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Indica si es un request HEAD (sólo headers, sin body)
    pub fn is_head(&self) -> bool {
        self.method.eq_ignore_ascii_case("HEAD")
    }

    /// Obtiene la URL de la request line
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers (nombres en minúsculas)
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header sin distinguir mayúsculas/minúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }
}
