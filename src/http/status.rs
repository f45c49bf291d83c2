//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! El servidor de archivos sólo produce tres respuestas:
//!
//! - **200 OK**: el archivo existe y se envía completo
//! - **304 Not Modified**: el cliente ya tiene la versión actual
//! - **404 Not Found**: cualquier otro caso (request malformado incluido)

/// Códigos de estado que puede emitir el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200 OK - El archivo se envía en el body
    Ok = 200,

    /// 304 Not Modified - Respuesta condicional sin body
    NotModified = 304,

    /// 404 Not Found - Recurso inexistente o request inválido
    NotFound = 404,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::StatusCode;
    /// assert_eq!(StatusCode::NotModified.as_u16(), 304);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotModified => "Not Modified",
            StatusCode::NotFound => "Not Found",
        }
    }

    /// Indica si una respuesta con este código lleva body
    pub fn allows_body(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
