//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor de archivos con soporte para argumentos CLI
//! y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_worker --port 8080 --root ./public --server-name "Mi Server"
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 DOC_ROOT=./public ./web_worker
//! ```

use crate::error::ServerError;
use crate::worker::Site;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Configuración del servidor de archivos
#[derive(Debug, Clone, Parser)]
#[command(name = "web_worker")]
#[command(about = "Servidor HTTP de archivos: una petición GET por conexión")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde el que se sirven los archivos
    #[arg(long, default_value = ".", env = "DOC_ROOT")]
    pub root: PathBuf,

    /// Archivo que se sirve cuando se pide `/`
    #[arg(long, default_value = "index.html", env = "INDEX_FILE")]
    pub index: String,

    /// Nombre del servidor (header `Server` y placeholder `<cs371server>`)
    #[arg(long = "server-name", default_value = "RedUnix File Server", env = "SERVER_NAME")]
    pub server_name: String,

    /// Timeout de lectura del request en milisegundos
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use web_worker::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Datos del sitio que necesita cada worker
    pub fn site(&self) -> Site {
        Site::new(&self.root, &self.index, &self.server_name)
    }

    /// Valida la configuración
    ///
    /// El puerto 0 no se acepta aquí; los tests hacen bind directo.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.port == 0 {
            return Err(ServerError::Config("Port must be > 0".to_string()));
        }
        if self.read_timeout_ms == 0 {
            return Err(ServerError::Config("Read timeout must be > 0".to_string()));
        }
        if self.index.trim().is_empty() {
            return Err(ServerError::Config("Index file must not be empty".to_string()));
        }
        if self.server_name.trim().is_empty() {
            return Err(ServerError::Config("Server name must not be empty".to_string()));
        }
        // Va tal cual en un header
        if self.server_name.contains(['\r', '\n']) {
            return Err(ServerError::Config(
                "Server name must not contain line breaks".to_string(),
            ));
        }
        if !self.root.is_dir() {
            return Err(ServerError::Config(format!(
                "Document root is not a directory: {}",
                self.root.display()
            )));
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn print_summary(&self) {
        info!(
            address = %self.address(),
            root = %self.root.display(),
            index = %self.index,
            server_name = %self.server_name,
            read_timeout_ms = self.read_timeout_ms,
            "configuration loaded"
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            root: PathBuf::from("."),
            index: "index.html".to_string(),
            server_name: "RedUnix File Server".to_string(),
            read_timeout_ms: 5_000,
        }
    }
}
