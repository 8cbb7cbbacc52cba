//! # Web Worker
//! src/lib.rs
//!
//! Servidor HTTP de archivos mínimo: por cada conexión lee una request
//! line `GET`, decide si el archivo pedido existe, escribe un header HTTP
//! mínimo y transmite el archivo (sustituyendo dos placeholders si es
//! HTML) o un body 404.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Request line, status codes, Content-Type y header de respuesta
//! - `worker`: Ciclo de vida de una conexión (`WebWorker`)
//! - `server`: Listener TCP, un thread por conexión
//! - `config`: Argumentos CLI y variables de entorno
//! - `error`: Errores de infraestructura
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use web_worker::config::Config;
//! use web_worker::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(&config).expect("Error al hacer bind");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod worker;

pub use error::{ServerError, WorkerError};
pub use worker::{Site, WebWorker};
