use super::response_reader::DocumentScanner;
use crate::entity_mediation::domain::GmpCommand;
use crate::ports::outbound::{GmpClient, GmpConnector};
use crate::shared::error::HyperionError;
use crate::shared::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Size of each socket read
const READ_CHUNK_SIZE: usize = 8192;

/// Largest response accepted unless configured otherwise (256 MiB)
pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 256 * 1024 * 1024;

/// Where gvmd listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GmpAddress {
    Unix(PathBuf),
    Tcp(String),
}

impl fmt::Display for GmpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GmpAddress::Unix(path) => write!(f, "unix:{}", path.display()),
            GmpAddress::Tcp(address) => write!(f, "tcp:{}", address),
        }
    }
}

trait GmpStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> GmpStream for T {}

/// SocketGmpConnector opens one stream per call to [`GmpConnector::connect`].
pub struct SocketGmpConnector {
    address: GmpAddress,
    timeout: Duration,
    max_response_size: usize,
}

impl SocketGmpConnector {
    pub fn new(address: GmpAddress, timeout: Duration) -> Self {
        Self {
            address,
            timeout,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }

    /// Responses growing past `bytes` fail with a transport error.
    pub fn with_max_response_size(mut self, bytes: usize) -> Self {
        self.max_response_size = bytes;
        self
    }

    pub fn address(&self) -> &GmpAddress {
        &self.address
    }

    async fn open_stream(&self) -> Result<Box<dyn GmpStream>> {
        let connecting = async {
            let stream: Box<dyn GmpStream> = match &self.address {
                #[cfg(unix)]
                GmpAddress::Unix(path) => Box::new(tokio::net::UnixStream::connect(path).await?),
                #[cfg(not(unix))]
                GmpAddress::Unix(_) => {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::Unsupported,
                        "Unix sockets are not available on this platform",
                    ))
                }
                GmpAddress::Tcp(address) => Box::new(TcpStream::connect(address.as_str()).await?),
            };
            Ok::<_, std::io::Error>(stream)
        };

        match timeout(self.timeout, connecting).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(self.transport_error(e.to_string()).into()),
            Err(_) => Err(self.transport_error("Timed out while connecting").into()),
        }
    }

    fn transport_error(&self, details: impl Into<String>) -> HyperionError {
        let error = HyperionError::GmpTransport {
            address: self.address.to_string(),
            details: details.into(),
        };
        tracing::error!(address = %self.address, "{}", error);
        error
    }
}

#[async_trait]
impl GmpConnector for SocketGmpConnector {
    async fn connect(&self) -> Result<Box<dyn GmpClient>> {
        let stream = self.open_stream().await?;
        tracing::debug!(address = %self.address, "Opened GMP connection");
        Ok(Box::new(SocketGmpClient {
            address: self.address.clone(),
            timeout: self.timeout,
            max_response_size: self.max_response_size,
            stream: Mutex::new(stream),
        }))
    }
}

/// One GMP connection; commands on it are serialized by the mutex.
pub struct SocketGmpClient {
    address: GmpAddress,
    timeout: Duration,
    max_response_size: usize,
    stream: Mutex<Box<dyn GmpStream>>,
}

impl SocketGmpClient {
    fn transport_error(&self, details: impl Into<String>) -> anyhow::Error {
        let error = HyperionError::GmpTransport {
            address: self.address.to_string(),
            details: details.into(),
        };
        tracing::error!(address = %self.address, "{}", error);
        error.into()
    }

    async fn read_response(&self, stream: &mut Box<dyn GmpStream>) -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];
        let mut scanner = DocumentScanner::new();

        loop {
            let read = match timeout(self.timeout, stream.read(&mut chunk)).await {
                Ok(Ok(read)) => read,
                Ok(Err(e)) => return Err(self.transport_error(e.to_string())),
                Err(_) => return Err(self.transport_error("Timed out waiting for a response")),
            };
            if read == 0 {
                return Err(self.transport_error("Connection closed before the response was complete"));
            }
            if buffer.len() + read > self.max_response_size {
                return Err(self.transport_error(format!(
                    "Response exceeds the limit of {} bytes",
                    self.max_response_size
                )));
            }
            buffer.extend_from_slice(&chunk[..read]);
            if scanner.is_complete(&buffer) {
                break;
            }
        }

        String::from_utf8(buffer).map_err(|e| self.transport_error(e.to_string()))
    }
}

#[async_trait]
impl GmpClient for SocketGmpClient {
    async fn send(&self, command: &GmpCommand) -> Result<String> {
        let xml = command.to_xml()?;
        tracing::debug!(command = command.name(), "Sending GMP command");

        let mut stream = self.stream.lock().await;
        let written = async {
            stream.write_all(xml.as_bytes()).await?;
            stream.flush().await
        };
        match timeout(self.timeout, written).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(self.transport_error(e.to_string())),
            Err(_) => return Err(self.transport_error("Timed out while sending a command")),
        }

        self.read_response(&mut stream).await
    }
}
