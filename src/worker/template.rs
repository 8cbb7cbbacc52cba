//! # Sustitución de placeholders en HTML
//! src/worker/template.rs
//!
//! Los archivos HTML pueden traer dos marcas que se reemplazan al vuelo:
//!
//! - `<cs371date>`: fecha local del servidor en formato `MM/DD/YYYY`
//! - `<cs371server>`: nombre configurado del servidor
//!
//! El reemplazo trabaja sobre bytes y línea por línea, así que un HTML
//! que no sea UTF-8 válido pasa igual, y los terminadores de línea se
//! conservan. Las líneas muy largas se procesan en pedazos acotados.

use chrono::{DateTime, Local, Utc};
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;
use std::io::{self, BufRead, Read, Write};
use std::sync::OnceLock;

pub const DATE_PLACEHOLDER: &str = "<cs371date>";
pub const SERVER_PLACEHOLDER: &str = "<cs371server>";

/// Tope de bytes que se procesan de una vez cuando una línea es muy larga
const MAX_CHUNK: u64 = 64 * 1024;

/// Formato de la fecha que reemplaza a `<cs371date>`
const DAY_FORMAT: &str = "%m/%d/%Y";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDERS: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDERS.get_or_init(|| {
        let pattern = format!(
            "{}|{}",
            regex::escape(DATE_PLACEHOLDER),
            regex::escape(SERVER_PLACEHOLDER)
        );
        Regex::new(&pattern).expect("placeholder pattern is a valid regex")
    })
}

/// Valores con los que se reemplazan los placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    date: String,
    server: String,
}

impl Placeholders {
    /// Construye los valores para el instante dado
    ///
    /// La fecha se muestra en la zona horaria local del servidor.
    pub fn new(now: DateTime<Utc>, server: &str) -> Self {
        Self {
            date: now.with_timezone(&Local).format(DAY_FORMAT).to_string(),
            server: server.to_string(),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Reemplaza todas las apariciones en una línea
    ///
    /// # Ejemplo
    /// ```
    /// use chrono::Utc;
    /// use web_worker::worker::Placeholders;
    ///
    /// let values = Placeholders::new(Utc::now(), "Mi Server");
    /// let out = values.apply(b"<p><cs371server></p>\n");
    /// assert_eq!(&out[..], b"<p>Mi Server</p>\n");
    /// ```
    pub fn apply<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        let date = self.date.as_bytes();
        let server = self.server.as_bytes();

        placeholder_regex().replace_all(line, |caps: &Captures<'_>| {
            if &caps[0] == DATE_PLACEHOLDER.as_bytes() {
                date
            } else {
                server
            }
        })
    }

    /// Copia `reader` en `writer` línea por línea aplicando los reemplazos
    ///
    /// Una línea más larga que `MAX_CHUNK` se procesa en pedazos; si un
    /// pedazo termina en medio de un placeholder, esa cola pasa al
    /// siguiente. Retorna la cantidad de bytes escritos.
    pub fn copy<R: BufRead, W: Write>(&self, reader: &mut R, writer: &mut W) -> io::Result<u64> {
        self.copy_in_chunks(reader, writer, MAX_CHUNK)
    }

    fn copy_in_chunks<R: BufRead, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
        chunk: u64,
    ) -> io::Result<u64> {
        let mut pending = Vec::new();
        let mut written = 0u64;

        loop {
            let read = reader.by_ref().take(chunk).read_until(b'\n', &mut pending)?;
            if read == 0 {
                // EOF: lo que quedó pendiente ya no puede completarse
                let replaced = self.apply(&pending);
                writer.write_all(&replaced)?;
                written += replaced.len() as u64;
                break;
            }

            let cut = if pending.ends_with(b"\n") {
                pending.len()
            } else {
                split_point(&pending)
            };

            {
                let replaced = self.apply(&pending[..cut]);
                writer.write_all(&replaced)?;
                written += replaced.len() as u64;
            }
            pending.drain(..cut);
        }

        Ok(written)
    }
}

/// Dónde cortar un pedazo sin partir un placeholder
///
/// Guarda la cola más larga que todavía puede ser el comienzo de
/// `<cs371date>` o `<cs371server>`.
fn split_point(buf: &[u8]) -> usize {
    let longest = DATE_PLACEHOLDER.len().max(SERVER_PLACEHOLDER.len()) - 1;
    let start = buf.len().saturating_sub(longest);

    (start..buf.len())
        .find(|&i| {
            let tail = &buf[i..];
            [DATE_PLACEHOLDER, SERVER_PLACEHOLDER]
                .iter()
                .any(|p| p.len() > tail.len() && p.as_bytes().starts_with(tail))
        })
        .unwrap_or(buf.len())
}
