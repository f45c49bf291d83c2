//! # Apagado del servidor
//! src/server/shutdown.rs
//!
//! `accept()` es bloqueante, así que marcar un flag no basta: después de
//! marcarlo se abre una conexión descartable contra el propio listener
//! para que el loop despierte, vea el flag y termine.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const WAKE_TIMEOUT: Duration = Duration::from_secs(1);

/// Handle clonable para pedir que el servidor termine
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    /// `local_addr` es la dirección real del listener
    pub(crate) fn new(local_addr: SocketAddr) -> Self {
        Self {
            requested: Arc::new(AtomicBool::new(false)),
            wake_addr: wake_address(local_addr),
        }
    }

    /// Pide el apagado; llamadas repetidas no hacen nada
    pub fn trigger(&self) {
        if self.requested.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Err(e) = TcpStream::connect_timeout(&self.wake_addr, WAKE_TIMEOUT) {
            debug!("Conexión para despertar el listener falló: {}", e);
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Un listener en 0.0.0.0 / :: se alcanza por loopback
fn wake_address(local_addr: SocketAddr) -> SocketAddr {
    let ip = match local_addr.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, local_addr.port())
}
