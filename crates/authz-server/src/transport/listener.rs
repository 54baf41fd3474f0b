//! Plugin endpoint setup.
//!
//! Unix transport: `<socket_dir>/<name>.sock`, parent created on demand, stale
//! socket replaced, mode 0660, group set to `socket_gid`.
//! TCP transport: bound address published as `tcp://<addr>` in
//! `<spec_dir>/<name>.spec` so the engine can discover it.
//!
//! Files created here are removed when the listener is dropped.

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tokio::net::{TcpListener, TcpStream, UnixListener, UnixStream};

use authz_core::error::{AuthzError, Result};

use crate::config::{PluginSection, TransportKind};

const SOCKET_MODE: u32 = 0o660;

/// Removes the wrapped path on drop.
#[derive(Debug)]
pub struct FileGuard {
    path: PathBuf,
}

impl FileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "cleanup failed");
            }
        }
    }
}

pub enum PluginListener {
    Unix {
        listener: UnixListener,
        socket: FileGuard,
    },
    Tcp {
        listener: TcpListener,
        addr: SocketAddr,
        spec: FileGuard,
    },
}

pub enum Conn {
    Unix(UnixStream),
    Tcp(TcpStream),
}

impl PluginListener {
    /// Bind the endpoint described by `cfg`.
    pub async fn bind(cfg: &PluginSection) -> Result<Self> {
        match cfg.transport {
            TransportKind::Unix => bind_unix(&cfg.socket_path(), cfg.socket_gid),
            TransportKind::Tcp => bind_tcp(cfg.tcp_socket_addr()?, &cfg.spec_path()).await,
        }
    }

    pub async fn accept(&self) -> io::Result<Conn> {
        match self {
            PluginListener::Unix { listener, .. } => {
                let (stream, _) = listener.accept().await?;
                Ok(Conn::Unix(stream))
            }
            PluginListener::Tcp { listener, .. } => {
                let (stream, _) = listener.accept().await?;
                Ok(Conn::Tcp(stream))
            }
        }
    }

    /// Human-readable endpoint for logs.
    pub fn describe(&self) -> String {
        match self {
            PluginListener::Unix { socket, .. } => format!("unix://{}", socket.path().display()),
            PluginListener::Tcp { addr, spec, .. } => {
                format!("tcp://{addr} (spec {})", spec.path().display())
            }
        }
    }
}

pub fn bind_unix(path: &Path, gid: Option<u32>) -> Result<PluginListener> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| AuthzError::io(dir, e))?;
    }
    remove_stale(path)?;

    let listener = UnixListener::bind(path)
        .map_err(|e| AuthzError::bind(path.display().to_string(), e))?;
    let socket = FileGuard::new(path.to_path_buf());

    fs::set_permissions(path, fs::Permissions::from_mode(SOCKET_MODE))
        .map_err(|e| AuthzError::io(path, e))?;
    if let Some(gid) = gid {
        std::os::unix::fs::chown(path, None, Some(gid)).map_err(|e| AuthzError::io(path, e))?;
    }

    Ok(PluginListener::Unix { listener, socket })
}

pub async fn bind_tcp(addr: SocketAddr, spec_path: &Path) -> Result<PluginListener> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AuthzError::bind(addr.to_string(), e))?;
    let addr = listener
        .local_addr()
        .map_err(|e| AuthzError::bind(addr.to_string(), e))?;

    if let Some(dir) = spec_path.parent() {
        fs::create_dir_all(dir).map_err(|e| AuthzError::io(dir, e))?;
    }
    fs::write(spec_path, format!("tcp://{addr}")).map_err(|e| AuthzError::io(spec_path, e))?;
    let spec = FileGuard::new(spec_path.to_path_buf());

    Ok(PluginListener::Tcp {
        listener,
        addr,
        spec,
    })
}

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed stale socket");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AuthzError::io(path, e)),
    }
}
