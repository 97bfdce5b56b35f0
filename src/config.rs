//! Runtime configuration for the server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Args;
use quicknotes_core::db::DbResult;
use quicknotes_core::Database;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 8000;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "quicknotes=debug,quicknotes_core=debug,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ServeArgs {
    /// Address to bind the HTTP API to
    #[arg(long, env = "QUICKNOTES_HOST", default_value_t = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Port for HTTP API
    #[arg(short, long, env = "QUICKNOTES_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, env = "QUICKNOTES_DATABASE")]
    pub database: Option<PathBuf>,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            database: None,
        }
    }
}

impl ServeArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn open_database(&self) -> DbResult<Database> {
        match &self.database {
            Some(path) => Database::open(path),
            None => Database::open_default(),
        }
    }
}
