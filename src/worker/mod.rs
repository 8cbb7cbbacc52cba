//! # Web Worker
//! src/worker/mod.rs
//!
//! Un `WebWorker` atiende exactamente un request sobre un stream ya
//! abierto (cualquier cosa que sea `Read + Write`) y termina:
//!
//! ```text
//! leer cabecera → abrir archivo → escribir header → escribir body → flush
//! ```
//!
//! El header se escribe completo antes del primer byte del body. Los
//! archivos HTML pasan por la sustitución de placeholders; el resto se
//! copia tal cual. Si el archivo no existe se responde 404 con un body
//! HTML mínimo.

pub mod resource;
pub mod template;

pub use resource::Resource;
pub use template::Placeholders;

use crate::error::WorkerError;
use crate::http::{not_found_body, RequestHead, ResponseHeader, StatusCode};
use chrono::{DateTime, Utc};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Lo que el worker necesita saber del sitio que sirve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Document root
    pub root: PathBuf,

    /// Archivo que se sirve para `/`
    pub index: String,

    /// Valor del header `Server` y de `<cs371server>`
    pub server_name: String,
}

impl Site {
    pub fn new(root: impl AsRef<Path>, index: &str, server_name: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            index: index.to_string(),
            server_name: server_name.to_string(),
        }
    }
}

/// Atiende una conexión: un request, una respuesta
pub struct WebWorker<'a, S> {
    stream: S,
    site: &'a Site,
}

impl<'a, S: Read + Write> WebWorker<'a, S> {
    pub fn new(stream: S, site: &'a Site) -> Self {
        Self { stream, site }
    }

    /// Procesa la conexión usando la hora actual
    pub fn run(self) -> Result<StatusCode, WorkerError> {
        self.run_at(Utc::now())
    }

    /// Procesa la conexión con un instante fijo
    ///
    /// El instante alimenta el header `Date` y el placeholder de fecha.
    ///
    /// `Done handling connection.` se registra siempre, también cuando la
    /// escritura falla.
    pub fn run_at(mut self, now: DateTime<Utc>) -> Result<StatusCode, WorkerError> {
        info!("Handling connection...");

        let result = self.respond(now);
        match &result {
            Ok((status, bytes)) => {
                info!(status = %status, body_bytes = bytes, "Done handling connection.")
            }
            Err(e) => warn!(error = %e, "Done handling connection."),
        }

        result.map(|(status, _)| status)
    }

    /// Lee la cabecera y escribe la respuesta completa
    fn respond(&mut self, now: DateTime<Utc>) -> Result<(StatusCode, u64), WorkerError> {
        let head = {
            let mut reader = BufReader::new(&mut self.stream);
            RequestHead::read_from(&mut reader)
        };

        let resource = match head.request_line() {
            Some(line) => Resource::open(self.site, line.requested_name()),
            None => Resource::Missing {
                name: String::new(),
            },
        };
        let header = ResponseHeader::new(
            resource.status(),
            resource.content_type(),
            now,
            &self.site.server_name,
        );

        let mut writer = BufWriter::new(&mut self.stream);

        // Fase 1: header
        header.write_to(&mut writer)?;

        // Fase 2: body
        let status = resource.status();
        let bytes = write_content(&mut writer, resource, now, &self.site.server_name)?;

        writer.flush()?;
        drop(writer);
        self.stream.flush()?;

        Ok((status, bytes))
    }
}

/// Escribe el body según el recurso encontrado
fn write_content<W: Write>(
    writer: &mut W,
    resource: Resource,
    now: DateTime<Utc>,
    server_name: &str,
) -> io::Result<u64> {
    match resource {
        Resource::Found {
            file,
            name,
            content_type,
        } if content_type.is_html() => {
            debug!(name = %name, "serving html with placeholders");
            let mut reader = BufReader::new(file);
            Placeholders::new(now, server_name).copy(&mut reader, writer)
        }
        Resource::Found { mut file, name, .. } => {
            debug!(name = %name, "serving raw bytes");
            io::copy(&mut file, writer)
        }
        Resource::Missing { name } => {
            debug!(name = %name, "file not found");
            let body = not_found_body(&name);
            writer.write_all(body.as_bytes())?;
            Ok(body.len() as u64)
        }
    }
}
