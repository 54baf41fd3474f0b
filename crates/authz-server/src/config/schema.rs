use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use authz_core::error::{AuthzError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    pub version: u32,

    #[serde(default)]
    pub plugin: PluginSection,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            version: 1,
            plugin: PluginSection::default(),
        }
    }
}

impl PluginConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AuthzError::UnsupportedVersion(self.version));
        }

        self.plugin.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    #[default]
    Unix,
    Tcp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginSection {
    /// Plugin name the engine addresses (`--authorization-plugin=<name>`),
    /// or an absolute socket path.
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub transport: TransportKind,

    #[serde(default = "default_socket_dir")]
    pub socket_dir: PathBuf,

    /// Group owner of the socket file. `null` leaves ownership untouched.
    #[serde(default = "default_socket_gid")]
    pub socket_gid: Option<u32>,

    #[serde(default = "default_tcp_addr")]
    pub tcp_addr: String,

    #[serde(default = "default_spec_dir")]
    pub spec_dir: PathBuf,

    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for PluginSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            transport: TransportKind::default(),
            socket_dir: default_socket_dir(),
            socket_gid: default_socket_gid(),
            tcp_addr: default_tcp_addr(),
            spec_dir: default_spec_dir(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

impl PluginSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(AuthzError::InvalidConfig("plugin.name must not be empty".into()));
        }
        if !Path::new(&self.name).is_absolute() && !is_plain_name(&self.name) {
            return Err(AuthzError::InvalidConfig(format!(
                "plugin.name must match [A-Za-z0-9._-]+ or be an absolute path: {}",
                self.name
            )));
        }
        if Path::new(&self.name).is_absolute() && Path::new(&self.name).file_stem().is_none() {
            return Err(AuthzError::InvalidConfig(format!(
                "plugin.name must name a file when given as a path: {}",
                self.name
            )));
        }
        if !(1024..=64 * 1024 * 1024).contains(&self.max_request_bytes) {
            return Err(AuthzError::InvalidConfig(
                "plugin.max_request_bytes must be between 1024 and 67108864".into(),
            ));
        }
        if self.transport == TransportKind::Tcp {
            self.tcp_socket_addr()?;
        }
        Ok(())
    }

    /// Socket file path for the unix transport.
    pub fn socket_path(&self) -> PathBuf {
        let name = Path::new(&self.name);
        if name.is_absolute() {
            return name.to_path_buf();
        }
        self.socket_dir.join(format!("{}.sock", self.name))
    }

    /// Discovery file path for the tcp transport.
    pub fn spec_path(&self) -> PathBuf {
        let name = Path::new(&self.name);
        let stem = match name.file_stem() {
            Some(s) if name.is_absolute() => s.to_string_lossy().into_owned(),
            _ => self.name.clone(),
        };
        self.spec_dir.join(format!("{stem}.spec"))
    }

    pub fn tcp_socket_addr(&self) -> Result<SocketAddr> {
        self.tcp_addr.parse().map_err(|_| {
            AuthzError::InvalidConfig(format!(
                "plugin.tcp_addr must be a valid SocketAddr: {}",
                self.tcp_addr
            ))
        })
    }
}

fn is_plain_name(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

fn default_name() -> String {
    "authz-sample-plugin".into()
}
fn default_socket_dir() -> PathBuf {
    PathBuf::from("/run/docker/plugins")
}
fn default_socket_gid() -> Option<u32> {
    Some(0)
}
fn default_tcp_addr() -> String {
    "127.0.0.1:9095".into()
}
fn default_spec_dir() -> PathBuf {
    PathBuf::from("/etc/docker/plugins")
}
fn default_max_request_bytes() -> usize {
    4 * 1024 * 1024
}
