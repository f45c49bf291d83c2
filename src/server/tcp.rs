//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Loop iterativo: acepta una conexión, la atiende completa, la cierra y
//! vuelve a aceptar. No hay threads por conexión; un cliente lento
//! bloquea a los demás.

use super::shutdown::ShutdownHandle;
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::files::FileService;
use crate::http::StatusCode;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Instant;
use tracing::{error, info, warn};

/// Servidor HTTP de archivos, una conexión a la vez
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    service: FileService,
    buffer_size: usize,
    shutdown: ShutdownHandle,
}

impl Server {
    /// Valida la configuración y abre el socket de escucha
    ///
    /// Un fallo aquí es fatal: el loop nunca arranca.
    pub fn bind(config: Config) -> Result<Self> {
        config.validate().map_err(ServerError::InvalidConfig)?;

        let address = config.address();
        info!("Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
        let local_addr = listener.local_addr()?;

        info!("Servidor escuchando en {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            service: FileService::from_config(&config),
            buffer_size: config.buffer_size,
            shutdown: ShutdownHandle::new(local_addr),
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle para detener [`Server::run`] desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Atiende conexiones hasta que se pida el apagado
    ///
    /// Consume el servidor: al retornar, el socket de escucha ya está
    /// cerrado. Los errores de `accept` se registran y el loop sigue.
    pub fn run(self) {
        info!("Modo iterativo: una conexión a la vez");

        for stream in self.listener.incoming() {
            if self.shutdown.is_requested() {
                break;
            }

            match stream {
                Ok(stream) => self.serve(stream),
                Err(e) => warn!("Error al aceptar conexión: {}", e),
            }
        }

        drop(self.listener);
        info!("Servidor detenido, socket de escucha cerrado");
    }

    /// Atiende una conexión y la cierra
    fn serve(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        info!("Conexión establecida: {}", peer);

        match handle_connection(stream, &self.service, self.buffer_size) {
            Ok(status) => info!("Conexión cerrada: {} ({})", peer, status),
            Err(e) => error!("Conexión cerrada con error: {} ({})", peer, e),
        }
    }
}

/// Lee un request, envía una respuesta y cierra el stream
///
/// Un error de lectura se responde igual con 404. Un error de escritura
/// (cliente desconectado) se retorna; el stream se cierra en ambos casos
/// porque se consume aquí.
pub fn handle_connection<S: Read + Write>(
    mut stream: S,
    service: &FileService,
    buffer_size: usize,
) -> io::Result<StatusCode> {
    let start = Instant::now();

    let response = match read_request(&mut stream, buffer_size) {
        Ok(raw) => service.respond(&raw),
        Err(e) => {
            warn!("Error leyendo request: {}", e);
            service.not_found()
        }
    };

    let status = response.status();
    let sent = response.write_to(&mut stream)?;

    info!(
        "{} ({} bytes de body, {:.2}ms)",
        status,
        sent,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(status)
}

/// Una sola lectura de hasta `buffer_size` bytes
///
/// Lo que el cliente envíe después (o más allá del buffer) se ignora.
pub fn read_request<R: Read>(reader: &mut R, buffer_size: usize) -> io::Result<Vec<u8>> {
    let mut buffer = vec![0u8; buffer_size];

    let bytes_read = loop {
        match reader.read(&mut buffer) {
            Ok(n) => break n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    };

    buffer.truncate(bytes_read);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::DateStyle;
    use std::fs;
    use std::io::Cursor;
    use std::net::Shutdown;
    use std::thread;
    use tempfile::TempDir;

    /// Stream en memoria: lee de `input`, escribe en `output`
    struct MockStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl MockStream {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
            }
        }
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Lector que siempre falla
    struct FailingStream {
        output: Vec<u8>,
    }

    impl Read for FailingStream {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    impl Write for FailingStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn setup() -> (TempDir, FileService) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), b"0123456789").unwrap();
        let service = FileService::new(dir.path().to_path_buf(), "test".to_string(), DateStyle::Utc);
        (dir, service)
    }

    #[test]
    fn test_read_request_single_read_bounded() {
        let mut reader = Cursor::new(vec![b'a'; 100]);
        let raw = read_request(&mut reader, 16).unwrap();
        assert_eq!(raw.len(), 16);
    }

    #[test]
    fn test_read_request_empty() {
        let mut reader = Cursor::new(Vec::new());
        assert!(read_request(&mut reader, 16).unwrap().is_empty());
    }

    #[test]
    fn test_handle_connection_ok() {
        let (_dir, service) = setup();
        let mut stream = MockStream::new(b"GET /index.html HTTP/1.1\r\n\r\n");

        let status = handle_connection(&mut stream, &service, 4096).unwrap();

        assert_eq!(status, StatusCode::Ok);
        let text = String::from_utf8(stream.output).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Length: 10\r\n"));
        assert!(text.ends_with("\r\n\r\n0123456789"));
    }

    #[test]
    fn test_handle_connection_malformed() {
        let (_dir, service) = setup();
        let mut stream = MockStream::new(b"GARBAGE\r\n\r\n");

        let status = handle_connection(&mut stream, &service, 4096).unwrap();

        assert_eq!(status, StatusCode::NotFound);
        assert!(stream.output.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
        assert!(stream.output.ends_with(b"\r\n\r\n"));
    }

    #[test]
    fn test_handle_connection_read_error_is_not_found() {
        let (_dir, service) = setup();
        let mut stream = FailingStream { output: Vec::new() };

        let status = handle_connection(&mut stream, &service, 4096).unwrap();

        assert_eq!(status, StatusCode::NotFound);
        assert!(stream.output.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
    }

    #[test]
    fn test_handle_connection_truncated_headers() {
        let (_dir, service) = setup();
        // El header condicional queda fuera del buffer: se responde 200
        let mut raw = b"GET /index.html HTTP/1.1\r\nX-Padding: ".to_vec();
        raw.extend(std::iter::repeat(b'x').take(64));
        raw.extend_from_slice(b"\r\nIf-Modified-Since: Fri, 31 Dec 9999 23:59:59 GMT\r\n\r\n");
        let mut stream = MockStream::new(&raw);

        let status = handle_connection(&mut stream, &service, 64).unwrap();
        assert_eq!(status, StatusCode::Ok);

        let mut stream = MockStream::new(&raw);
        let status = handle_connection(&mut stream, &service, 4096).unwrap();
        assert_eq!(status, StatusCode::NotModified);
    }

    #[test]
    fn test_handle_connection_over_tcp() {
        let (_dir, service) = setup();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            handle_connection(stream, &service, 4096).unwrap()
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"GET /index.html HTTP/1.1\r\n\r\n").unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        // read_to_end termina sólo si el servidor cerró la conexión
        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        let text = String::from_utf8_lossy(&buf);

        assert!(text.contains("200 OK"));
        assert!(text.ends_with("0123456789"));
        assert_eq!(t.join().unwrap(), StatusCode::Ok);
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        let (_dir, service) = setup();
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            // Lectura vacía: se intenta igual un 404; la escritura puede fallar
            let _ = handle_connection(stream, &service, 4096);
        });

        drop(TcpStream::connect(addr).unwrap());
        t.join().unwrap();
    }

    #[test]
    fn test_bind_invalid_config() {
        let mut config = Config::default();
        config.buffer_size = 0;

        let result = Server::bind(config);
        assert!(matches!(result, Err(ServerError::InvalidConfig(_))));
    }

    #[test]
    fn test_bind_address_in_use() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: taken.local_addr().unwrap().port(),
            root_dir: dir.path().to_path_buf(),
            ..Config::default()
        };

        let result = Server::bind(config);
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }

    #[test]
    fn test_run_until_shutdown() {
        let (dir, _) = setup();
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            root_dir: dir.path().to_path_buf(),
            ..Config::default()
        };

        let server = Server::bind(config).unwrap();
        let addr = server.local_addr();
        let handle = server.shutdown_handle();
        let t = thread::spawn(move || server.run());

        for _ in 0..3 {
            let mut client = TcpStream::connect(addr).unwrap();
            client.write_all(b"GET /index.html HTTP/1.1\r\n\r\n").unwrap();
            let mut buf = Vec::new();
            client.read_to_end(&mut buf).unwrap();
            assert!(buf.starts_with(b"HTTP/1.1 200 OK\r\n"));
        }

        handle.trigger();
        t.join().unwrap();

        assert!(TcpStream::connect(addr).is_err());
    }
}
