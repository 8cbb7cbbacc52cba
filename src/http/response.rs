//! # Escritura de Respuestas HTTP
//! src/http/response.rs
//!
//! La respuesta se escribe en dos fases: primero el header completo y
//! después el body, que se transmite directamente desde el archivo.
//!
//! ## Formato del header
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Date: Tue, 15 Nov 1994 08:12:31 GMT\r\n
//! Server: RedUnix File Server\r\n
//! Connection: close\r\n
//! Content-Type: text/html\r\n
//! \r\n
//! ```

use super::{ContentType, StatusCode};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

/// Formato IMF-fixdate para el header `Date`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Header mínimo de la respuesta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    status: StatusCode,
    content_type: ContentType,
    date: DateTime<Utc>,
    server: String,
}

impl ResponseHeader {
    /// Crea un header con la fecha dada
    ///
    /// # Ejemplo
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use web_worker::http::{ContentType, ResponseHeader, StatusCode};
    ///
    /// let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    /// let header = ResponseHeader::new(StatusCode::Ok, ContentType::Png, date, "test");
    /// let text = String::from_utf8(header.to_bytes()).unwrap();
    /// assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    /// assert!(text.contains("Date: Fri, 01 Mar 2024 12:00:00 GMT\r\n"));
    /// ```
    pub fn new(
        status: StatusCode,
        content_type: ContentType,
        date: DateTime<Utc>,
        server: &str,
    ) -> Self {
        Self {
            status,
            content_type,
            date,
            server: server.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Serializa el header, incluida la línea vacía final
    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "{}\r\nDate: {}\r\nServer: {}\r\nConnection: close\r\nContent-Type: {}\r\n\r\n",
            self.status.status_line(),
            self.date.format(HTTP_DATE_FORMAT),
            self.server,
            self.content_type,
        )
        .into_bytes()
    }

    /// Fase 1: escribe el header completo
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

/// Body HTML para un archivo que no existe
///
/// # Ejemplo
/// ```
/// use web_worker::http::not_found_body;
///
/// assert_eq!(
///     not_found_body("missing.html"),
///     "<html><head></head><body>missing.html not found</body></html>\n"
/// );
/// ```
pub fn not_found_body(name: &str) -> String {
    format!(
        "<html><head></head><body>{} not found</body></html>\n",
        escape_html(name)
    )
}

/// Escapa los caracteres con significado en HTML
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 9, 8, 5, 3).unwrap()
    }

    #[test]
    fn test_header_layout() {
        let header = ResponseHeader::new(StatusCode::Ok, ContentType::Html, fixed_date(), "Srv");
        let text = String::from_utf8(header.to_bytes()).unwrap();

        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\n\
             Date: Tue, 09 Jan 2024 08:05:03 GMT\r\n\
             Server: Srv\r\n\
             Connection: close\r\n\
             Content-Type: text/html\r\n\
             \r\n"
        );
    }

    #[test]
    fn test_header_not_found() {
        let header = ResponseHeader::new(StatusCode::NotFound, ContentType::Html, fixed_date(), "Srv");
        let text = String::from_utf8(header.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_write_to() {
        let header = ResponseHeader::new(StatusCode::Ok, ContentType::Gif, fixed_date(), "Srv");
        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();

        assert_eq!(out, header.to_bytes());
        assert_eq!(header.status(), StatusCode::Ok);
        assert_eq!(header.content_type(), ContentType::Gif);
    }

    #[test]
    fn test_not_found_body_escapes() {
        let body = not_found_body("<script>&\"'");
        assert_eq!(
            body,
            "<html><head></head><body>&lt;script&gt;&amp;&quot;&#39; not found</body></html>\n"
        );
    }

    #[test]
    fn test_not_found_body_empty_name() {
        assert_eq!(not_found_body(""), "<html><head></head><body> not found</body></html>\n");
    }
}
