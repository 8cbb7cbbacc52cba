//! # Lectura del Request HTTP
//! src/http/request.rs
//!
//! Este módulo lee la cabecera de un request línea por línea y se queda
//! con la primera request line `GET`. El resto de headers se ignora.
//!
//! ## Formato
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! La lectura termina con la línea vacía, con EOF o con un error de
//! lectura. Un request malformado nunca corta la conexión: simplemente
//! no tiene archivo pedido y termina en 404.

use std::io::{BufRead, Read};
use thiserror::Error;
use tracing::{debug, warn};

/// Tope de bytes que se leen de la cabecera
pub const MAX_HEAD_BYTES: u64 = 8 * 1024;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un archivo
    GET,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

/// Errores que pueden ocurrir al parsear una request line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Línea vacía
    #[error("Empty request line")]
    Empty,

    /// Falta el target
    #[error("Invalid request line format")]
    InvalidRequestLine,

    /// Cualquier método distinto de GET
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Una request line `GET /target VERSION` ya parseada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,

    /// Target tal como llegó (ej: "/index.html")
    target: String,

    /// Versión, si el cliente la mandó (HTTP/0.9 no la trae)
    version: Option<String>,
}

impl RequestLine {
    /// Parsea una request line
    ///
    /// Basta con que la línea empiece con `GET` y traiga un segundo token
    /// (`GETX /a.html` también cuenta como GET).
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use web_worker::http::RequestLine;
    ///
    /// let line = RequestLine::parse("GET /index.html HTTP/1.1").unwrap();
    /// assert_eq!(line.target(), "/index.html");
    /// assert_eq!(line.requested_name(), "index.html");
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        if !line.starts_with("GET") {
            let method = line.split_whitespace().next().unwrap_or_default();
            return Err(ParseError::UnsupportedMethod(method.to_string()));
        }

        // Manda el prefijo de 3 letras: el primer token se descarta
        let mut parts = line.split_whitespace().skip(1);
        let target = parts.next().ok_or(ParseError::InvalidRequestLine)?;
        let version = parts.next().map(str::to_string);

        Ok(RequestLine {
            method: Method::GET,
            target: target.to_string(),
            version,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Nombre del archivo pedido: el target sin la `/` inicial
    pub fn requested_name(&self) -> &str {
        self.target.strip_prefix('/').unwrap_or(&self.target)
    }
}

/// Cabecera del request: solo nos interesa la request line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHead {
    request_line: Option<RequestLine>,
}

impl RequestHead {
    /// Lee la cabecera completa desde el stream
    ///
    /// Se queda con la primera línea GET válida. No falla nunca: los
    /// errores de lectura solo terminan la lectura. Se leen a lo sumo
    /// `MAX_HEAD_BYTES`; lo que siga queda sin consumir.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use std::io::Cursor;
    /// use web_worker::http::RequestHead;
    ///
    /// let mut raw = Cursor::new(&b"GET /logo.png HTTP/1.1\r\nHost: x\r\n\r\n"[..]);
    /// let head = RequestHead::read_from(&mut raw);
    /// assert_eq!(head.requested_name(), "logo.png");
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Self {
        let mut head = RequestHead::default();
        let mut buffer = Vec::new();
        let mut limited = reader.take(MAX_HEAD_BYTES);

        loop {
            buffer.clear();
            match limited.read_until(b'\n', &mut buffer) {
                Ok(0) => {
                    if limited.limit() == 0 {
                        warn!(limit = MAX_HEAD_BYTES, "request head too large, stop reading");
                    }
                    break;
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buffer);
                    let line = line.trim_end_matches(['\r', '\n']);
                    debug!("Request line: ({})", line);

                    if line.is_empty() {
                        break;
                    }

                    if head.request_line.is_none() {
                        match RequestLine::parse(line) {
                            Ok(request_line) => head.request_line = Some(request_line),
                            Err(e) => debug!(error = %e, "ignoring line"),
                        }
                    }
                }
                Err(e) => {
                    warn!("Request error: {}", e);
                    break;
                }
            }
        }

        head
    }

    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    /// Nombre del archivo pedido, vacío si no hubo request line GET
    pub fn requested_name(&self) -> &str {
        self.request_line
            .as_ref()
            .map(RequestLine::requested_name)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    #[test]
    fn test_parse_simple_get() {
        let line = RequestLine::parse("GET / HTTP/1.0").unwrap();

        assert_eq!(line.method(), Method::GET);
        assert_eq!(line.target(), "/");
        assert_eq!(line.requested_name(), "");
        assert_eq!(line.version(), Some("HTTP/1.0"));
    }

    #[test]
    fn test_parse_nested_path() {
        let line = RequestLine::parse("GET /img/logo.png HTTP/1.1\r\n").unwrap();
        assert_eq!(line.requested_name(), "img/logo.png");
    }

    #[test]
    fn test_parse_without_version() {
        let line = RequestLine::parse("GET /old.html").unwrap();
        assert_eq!(line.requested_name(), "old.html");
        assert_eq!(line.version(), None);
    }

    #[test]
    fn test_parse_unsupported_method() {
        let result = RequestLine::parse("POST /form HTTP/1.1");
        assert!(matches!(result, Err(ParseError::UnsupportedMethod(m)) if m == "POST"));
    }

    #[test]
    fn test_parse_missing_target() {
        assert_eq!(RequestLine::parse("GET"), Err(ParseError::InvalidRequestLine));
        assert_eq!(RequestLine::parse("GETX"), Err(ParseError::InvalidRequestLine));
    }

    #[test]
    fn test_parse_get_prefix_only() {
        let line = RequestLine::parse("GETX /a.html HTTP/1.1").unwrap();
        assert_eq!(line.method(), Method::GET);
        assert_eq!(line.requested_name(), "a.html");
    }

    #[test]
    fn test_head_get_prefix_only() {
        let mut reader = Cursor::new(&b"GETX /a.html HTTP/1.1\r\n\r\n"[..]);
        let head = RequestHead::read_from(&mut reader);
        assert_eq!(head.requested_name(), "a.html");
    }

    #[test]
    fn test_head_size_is_capped() {
        // 1 MiB sin un solo salto de línea
        let raw = vec![b'A'; 1024 * 1024];
        let mut reader = Cursor::new(raw);
        let head = RequestHead::read_from(&mut reader);

        assert!(head.request_line().is_none());
        assert_eq!(reader.position(), MAX_HEAD_BYTES);
    }

    #[test]
    fn test_head_cap_keeps_request_line() {
        let mut raw = b"GET /big.html HTTP/1.1\r\nX-Pad: ".to_vec();
        raw.extend(std::iter::repeat(b'x').take(64 * 1024));
        let mut reader = Cursor::new(raw);
        let head = RequestHead::read_from(&mut reader);

        assert_eq!(head.requested_name(), "big.html");
        assert_eq!(reader.position(), MAX_HEAD_BYTES);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(RequestLine::parse(""), Err(ParseError::Empty));
        assert_eq!(RequestLine::parse("\r\n"), Err(ParseError::Empty));
    }

    #[test]
    fn test_head_stops_at_blank_line() {
        let raw = b"GET /a.html HTTP/1.1\r\nHost: x\r\n\r\nGET /b.html HTTP/1.1\r\n";
        let mut reader = Cursor::new(&raw[..]);
        let head = RequestHead::read_from(&mut reader);

        assert_eq!(head.requested_name(), "a.html");

        // Lo que sigue a la línea vacía queda sin consumir
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "GET /b.html HTTP/1.1\r\n");
    }

    #[test]
    fn test_head_bare_lf() {
        let mut reader = Cursor::new(&b"GET /a.gif HTTP/1.0\nAccept: */*\n\n"[..]);
        let head = RequestHead::read_from(&mut reader);
        assert_eq!(head.requested_name(), "a.gif");
    }

    #[test]
    fn test_head_first_get_wins() {
        let mut reader = Cursor::new(&b"X-Junk: 1\r\nGET /first HTTP/1.1\r\nGET /second HTTP/1.1\r\n\r\n"[..]);
        let head = RequestHead::read_from(&mut reader);
        assert_eq!(head.requested_name(), "first");
    }

    #[test]
    fn test_head_without_get() {
        let mut reader = Cursor::new(&b"POST /form HTTP/1.1\r\n\r\n"[..]);
        let head = RequestHead::read_from(&mut reader);
        assert!(head.request_line().is_none());
        assert_eq!(head.requested_name(), "");
    }

    #[test]
    fn test_head_eof_without_blank_line() {
        let mut reader = Cursor::new(&b"GET /a.png HTTP/1.1\r\nHost: x"[..]);
        let head = RequestHead::read_from(&mut reader);
        assert_eq!(head.requested_name(), "a.png");
    }

    #[test]
    fn test_head_empty_stream() {
        let mut reader = Cursor::new(&b""[..]);
        let head = RequestHead::read_from(&mut reader);
        assert_eq!(head, RequestHead::default());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
        }
    }

    #[test]
    fn test_head_read_error() {
        let mut reader = io::BufReader::new(FailingReader);
        let head = RequestHead::read_from(&mut reader);
        assert_eq!(head.requested_name(), "");
    }
}
