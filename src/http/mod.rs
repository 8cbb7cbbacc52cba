//! # Módulo HTTP
//!
//! Implementa la parte mínima de HTTP que necesita el servidor de archivos:
//!
//! - Lectura de la request line `GET`
//! - Códigos de estado (200 y 404)
//! - Inferencia del `Content-Type` por extensión
//! - Escritura del header de la respuesta
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Date: ...\r\n
//! Server: ...\r\n
//! Connection: close\r\n
//! Content-Type: text/html\r\n
//! \r\n
//! <contenido del archivo>
//! ```

pub mod mime;      // Content-Type por extensión
pub mod request;   // Lectura de la request line
pub mod response;  // Header de la respuesta y body 404
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use mime::ContentType;
pub use request::{Method, ParseError, RequestHead, RequestLine};
pub use response::{not_found_body, ResponseHeader};
pub use status::StatusCode;
