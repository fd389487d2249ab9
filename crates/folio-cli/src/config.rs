//! Runtime configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables:
//!
//! | variable               | setting                  |
//! |------------------------|--------------------------|
//! | `PORT`                 | `server.port`            |
//! | `NODE_ENV`/`FOLIO_ENV` | `server.production`      |
//! | `ADMIN_PIN`            | `admin.pin`              |
//! | `ADMIN_SESSION_SECRET` | `admin.session_secret`   |
//! | `DATABASE_URL`         | `storage.database_url`   |
//! | `DATABASE_SSL`         | `storage.database_ssl`   |
//! | `FOLIO_DATA_FILE`      | `storage.data_file`      |
//! | `FOLIO_BACKUP_DIR`     | `storage.backup_dir`     |

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use folio_auth::AdminAuth;
use folio_storage::{StoreConfig, parse_ssl_flag};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Admin credentials.
    pub admin: AdminConfig,
    /// Content storage.
    pub storage: StoreConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Production mode: session cookies are always `Secure`.
    pub production: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5173,
            production: false,
        }
    }
}

/// `[admin]` section.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Passcode the owner logs in with.
    pub pin: String,
    /// HMAC secret for session tokens.
    pub session_secret: String,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("pin", &redacted(&self.pin))
            .field("session_secret", &redacted(&self.session_secret))
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() { "<unset>" } else { "<redacted>" }
}

impl FolioConfig {
    /// Load from `path` (if given) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Blank values are ignored, except that
    /// admin secrets are kept as given when non-empty.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(port) = get("PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::config(format!("Invalid PORT value {port:?}: {e}")))?;
        }
        if ["NODE_ENV", "FOLIO_ENV"]
            .iter()
            .any(|key| get(*key).is_some_and(|v| v.eq_ignore_ascii_case("production")))
        {
            self.server.production = true;
        }

        // Secrets are taken verbatim; only an empty value counts as unset.
        let secret = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(pin) = secret("ADMIN_PIN") {
            self.admin.pin = pin;
        }
        if let Some(session_secret) = secret("ADMIN_SESSION_SECRET") {
            self.admin.session_secret = session_secret;
        }

        if let Some(url) = get("DATABASE_URL") {
            self.storage.database_url = Some(url);
        }
        if let Some(ssl) = get("DATABASE_SSL").and_then(|v| parse_ssl_flag(&v)) {
            self.storage.database_ssl = Some(ssl);
        }
        if let Some(file) = get("FOLIO_DATA_FILE") {
            self.storage.data_file = PathBuf::from(file);
        }
        if let Some(dir) = get("FOLIO_BACKUP_DIR") {
            self.storage.backup_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.host.parse().map_err(|e| {
            Error::config(format!("Invalid server.host {:?}: {e}", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Admin credentials for the API.
    pub fn admin_auth(&self) -> AdminAuth {
        AdminAuth::new(self.admin.pin.as_str(), self.admin.session_secret.as_str())
    }
}
