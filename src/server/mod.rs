//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes
//! 3. Entrega cada conexión a un `WebWorker` en su propio thread

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::{handle_connection, Server};
