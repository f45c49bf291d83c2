//! # Requests condicionales
//! src/files/conditional.rs
//!
//! `If-Modified-Since` se compara en segundos enteros contra la fecha de
//! modificación del archivo. Un header que no se puede parsear se ignora.

use crate::http::date::{whole_seconds, DateStyle};
use crate::http::Request;
use std::time::SystemTime;
use tracing::debug;

/// Nombre del header condicional (en minúsculas)
pub const IF_MODIFIED_SINCE: &str = "if-modified-since";

/// `true` si el cliente ya tiene una copia igual o más nueva que el archivo
pub fn is_not_modified(request: &Request, modified: SystemTime, style: DateStyle) -> bool {
    let Some(value) = request.header(IF_MODIFIED_SINCE) else {
        return false;
    };

    let Some(since) = style.parse_timestamp(value) else {
        debug!("If-Modified-Since ignorado, fecha inválida: {:?}", value);
        return false;
    };

    let file_secs = whole_seconds(modified);
    debug!("If-Modified-Since: {} (archivo: {})", since, file_secs);

    since >= file_secs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn mtime() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_734_789_600) + Duration::from_millis(400)
    }

    fn request_with(header: Option<&str>) -> Request {
        let raw = match header {
            Some(value) => format!("GET /f HTTP/1.1\r\nIf-Modified-Since: {}\r\n\r\n", value),
            None => "GET /f HTTP/1.1\r\n\r\n".to_string(),
        };
        Request::parse(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_absent_header_is_modified() {
        assert!(!is_not_modified(&request_with(None), mtime(), DateStyle::Utc));
    }

    #[test]
    fn test_equal_timestamp_is_not_modified() {
        // La fracción de segundo del archivo se trunca
        let request = request_with(Some("Sat, 21 Dec 2024 14:00:00 GMT"));
        assert!(is_not_modified(&request, mtime(), DateStyle::Utc));
    }

    #[test]
    fn test_later_timestamp_is_not_modified() {
        let request = request_with(Some("Sun, 22 Dec 2024 09:30:00 GMT"));
        assert!(is_not_modified(&request, mtime(), DateStyle::Utc));
    }

    #[test]
    fn test_earlier_timestamp_is_modified() {
        let request = request_with(Some("Sat, 21 Dec 2024 13:59:59 GMT"));
        assert!(!is_not_modified(&request, mtime(), DateStyle::Utc));
    }

    #[test]
    fn test_wrong_weekday_still_compares_date() {
        let request = request_with(Some("Mon, 21 Dec 2024 14:00:00 GMT"));
        assert!(is_not_modified(&request, mtime(), DateStyle::Utc));
    }

    #[test]
    fn test_malformed_header_is_ignored() {
        let request = request_with(Some("not a date"));
        assert!(!is_not_modified(&request, mtime(), DateStyle::Utc));
    }

    #[test]
    fn test_local_style_roundtrip() {
        let formatted = DateStyle::Local.format(mtime());
        let request = request_with(Some(&formatted));
        assert!(is_not_modified(&request, mtime(), DateStyle::Local));
    }
}
