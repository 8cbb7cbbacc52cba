//! # Errores del servidor
//! src/error.rs
//!
//! Los 404 no son errores: se expresan como respuestas. Estos tipos solo
//! cubren fallos de infraestructura (bind, escritura al socket, config).

use thiserror::Error;

/// Error al atender una conexión
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Falló la escritura de la respuesta al cliente
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Error al levantar o correr el servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo hacer bind a la dirección configurada
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuración inválida
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
