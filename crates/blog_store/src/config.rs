use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: Ipv4Addr,
    pub port: u16,
    pub resource: String,
    pub seed: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::LOCALHOST,
            port: DEFAULT_PORT,
            resource: "articles".to_string(),
            seed: None,
        }
    }
}

impl StoreConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}
