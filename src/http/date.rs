//! # Fechas HTTP
//! src/http/date.rs
//!
//! Formato usado en `Date`, `Last-Modified` e `If-Modified-Since`:
//!
//! ```text
//! Thu, 01 Jan 1970 00:00:00 GMT
//! ```
//!
//! Con [`DateStyle::Local`] la hora es la del reloj local aunque la
//! etiqueta diga `GMT`; es el comportamiento histórico del servidor y se
//! conserva sólo como opción. El valor por defecto es UTC real.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use clap::ValueEnum;
use std::time::SystemTime;

/// Patrón `strftime` de las fechas HTTP
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Patrón sin el día de la semana, usado al parsear
const HTTP_DATE_PARSE_FORMAT: &str = "%d %b %Y %H:%M:%S GMT";

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Zona horaria con la que se escriben y se leen las fechas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DateStyle {
    /// UTC real, coherente con la etiqueta `GMT`
    #[default]
    Utc,

    /// Hora local etiquetada como `GMT`
    Local,
}

impl DateStyle {
    /// Formatea un instante como fecha HTTP
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::DateStyle;
    /// use std::time::SystemTime;
    ///
    /// let text = DateStyle::Utc.format(SystemTime::UNIX_EPOCH);
    /// assert_eq!(text, "Thu, 01 Jan 1970 00:00:00 GMT");
    /// ```
    pub fn format(&self, time: SystemTime) -> String {
        match self {
            DateStyle::Utc => DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string(),
            DateStyle::Local => DateTime::<Local>::from(time).format(HTTP_DATE_FORMAT).to_string(),
        }
    }

    /// Fecha actual formateada
    pub fn now(&self) -> String {
        self.format(SystemTime::now())
    }

    /// Parsea una fecha HTTP y retorna segundos desde epoch
    ///
    /// Retorna `None` si el texto no respeta el formato. El día de la
    /// semana debe ser una abreviatura válida pero no se contrasta con la
    /// fecha. En modo local, una hora ambigua (cambio de horario) se
    /// resuelve con la más temprana.
    pub fn parse_timestamp(&self, text: &str) -> Option<i64> {
        let (weekday, rest) = text.trim().split_once(", ")?;
        if !WEEKDAYS.iter().any(|day| day.eq_ignore_ascii_case(weekday)) {
            return None;
        }

        let naive = NaiveDateTime::parse_from_str(rest, HTTP_DATE_PARSE_FORMAT).ok()?;

        match self {
            DateStyle::Utc => Some(naive.and_utc().timestamp()),
            DateStyle::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.timestamp()),
        }
    }
}

/// Segundos enteros desde epoch de un instante (trunca fracciones)
pub fn whole_seconds(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp()
}
