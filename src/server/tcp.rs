//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Acepta conexiones y entrega cada una a un `WebWorker` en su propio
//! thread. Cada worker atiende un solo request y cierra la conexión.

use crate::config::Config;
use crate::error::ServerError;
use crate::worker::{Site, WebWorker};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

/// Servidor de archivos: un thread por conexión
pub struct Server {
    listener: TcpListener,
    site: Arc<Site>,
    read_timeout: Duration,
}

impl Server {
    /// Hace bind a la dirección configurada
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

        info!(address = %address, "server listening");

        Ok(Self {
            listener,
            site: Arc::new(config.site()),
            read_timeout: config.read_timeout(),
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Acepta conexiones para siempre
    ///
    /// Los errores de accept se registran y el loop sigue.
    pub fn run(self) -> Result<(), ServerError> {
        info!(root = %self.site.root.display(), "concurrent mode: one thread per connection");

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let site = Arc::clone(&self.site);
                    let read_timeout = self.read_timeout;

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    info!(peer = %peer_addr, "new connection (spawning thread)");

                    thread::spawn(move || {
                        handle_connection(stream, &site, read_timeout, &peer_addr);
                    });
                }
                Err(e) => {
                    error!("failed to accept connection: {}", e);
                }
            }
        }

        Ok(())
    }
}

/// Atiende una conexión completa y registra el resultado
pub fn handle_connection(stream: TcpStream, site: &Site, read_timeout: Duration, peer: &str) {
    if let Err(e) = stream.set_read_timeout(Some(read_timeout)) {
        warn!(peer = %peer, "cannot set read timeout: {}", e);
    }

    match WebWorker::new(stream, site).run() {
        Ok(status) => info!(peer = %peer, status = %status, "connection closed"),
        Err(e) => error!(peer = %peer, "Output error: {}", e),
    }
}
