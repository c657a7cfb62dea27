//! Service configuration.
//!
//! All settings are resolved once, up front, into a [`FigmaConfig`] that is
//! handed to the service. Request logic never reads the environment.

use std::fmt;
use std::path::PathBuf;

use crate::FigmaError;
use crate::user_agent;

/// Figma REST API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.figma.com/v1";

/// Proxy port used when `PROXY_PORT` is not set.
pub const DEFAULT_PROXY_PORT: u16 = 8080;

/// Directory for development-mode snapshots when `FIGMA_LOGS_DIR` is not set.
pub const DEFAULT_LOGS_DIR: &str = "logs";

const ENV_BASE_URL: &str = "FIGMA_BASE_URL";
const ENV_PROXY_HOST: &str = "PROXY_HOST";
const ENV_PROXY_PORT: &str = "PROXY_PORT";
const ENV_ACCEPT_INVALID_CERTS: &str = "FIGMA_ACCEPT_INVALID_CERTS";
const ENV_DEV_MODE: &str = "FIGMA_DEV_MODE";
const ENV_LOGS_DIR: &str = "FIGMA_LOGS_DIR";

/// A forward proxy that HTTPS traffic is tunnelled through with `CONNECT`.
///
/// No credentials are ever sent to the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRoute {
    /// Proxy host name or address.
    pub host: String,
    /// Proxy port.
    pub port: u16,
}

impl ProxyRoute {
    /// Creates a proxy route.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the proxy URL handed to the HTTP client (`http://host:port`).
    #[must_use]
    pub fn proxy_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ProxyRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Everything the service needs, fixed at construction.
#[derive(Clone)]
pub struct FigmaConfig {
    /// Personal access token sent as `X-Figma-Token`.
    pub api_key: String,
    /// API base URL; endpoints are appended verbatim.
    pub base_url: String,
    /// Optional forward proxy for HTTPS traffic.
    pub proxy: Option<ProxyRoute>,
    /// Skips certificate validation on the tunnelled connection.
    ///
    /// Has no effect without a [`proxy`](Self::proxy): direct connections are
    /// always validated.
    ///
    /// This is a security trade-off for networks whose proxy intercepts TLS
    /// with its own certificate authority. It defaults to `false` and should
    /// only be enabled where that interception is known and trusted.
    pub accept_invalid_certs: bool,
    /// Writes raw and simplified snapshots to [`logs_dir`](Self::logs_dir).
    pub dev_mode: bool,
    /// Destination for development-mode snapshots.
    pub logs_dir: PathBuf,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl FigmaConfig {
    /// Creates a config with defaults: public API, no proxy, strict TLS, dev mode off.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: None,
            accept_invalid_certs: false,
            dev_mode: false,
            logs_dir: PathBuf::from(DEFAULT_LOGS_DIR),
            user_agent: user_agent::default_api_user_agent(),
        }
    }

    /// Creates a config from the process environment.
    ///
    /// Reads `FIGMA_BASE_URL`, `PROXY_HOST`, `PROXY_PORT` (default `8080`),
    /// `FIGMA_ACCEPT_INVALID_CERTS`, `FIGMA_DEV_MODE` and `FIGMA_LOGS_DIR`
    /// (default `logs`). An unset or empty `PROXY_HOST` disables the tunnel.
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError::Unknown`] when `PROXY_PORT` is not a valid port or
    /// `FIGMA_BASE_URL` is not a valid URL.
    pub fn from_env(api_key: impl Into<String>) -> Result<Self, FigmaError> {
        Self::from_lookup(api_key, |name| std::env::var(name).ok())
    }

    /// Creates a config using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`FigmaError::Unknown`] when the proxy port or base URL is malformed.
    pub fn from_lookup<F>(api_key: impl Into<String>, lookup: F) -> Result<Self, FigmaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::new(api_key);

        if let Some(base_url) = value(ENV_BASE_URL) {
            url::Url::parse(&base_url).map_err(|e| {
                FigmaError::unknown(
                    "read configuration",
                    format!("{ENV_BASE_URL}={base_url:?} is not a valid URL: {e}"),
                )
            })?;
            config.base_url = base_url;
        }

        if let Some(host) = value(ENV_PROXY_HOST) {
            let port = match value(ENV_PROXY_PORT) {
                Some(raw) => raw.parse::<u16>().map_err(|e| {
                    FigmaError::unknown(
                        "read configuration",
                        format!("{ENV_PROXY_PORT}={raw:?} is not a valid port: {e}"),
                    )
                })?,
                None => DEFAULT_PROXY_PORT,
            };
            config.proxy = Some(ProxyRoute::new(host, port));
        }

        config.accept_invalid_certs =
            value(ENV_ACCEPT_INVALID_CERTS).is_some_and(|v| is_truthy(&v));
        config.dev_mode = value(ENV_DEV_MODE).is_some_and(|v| is_truthy(&v));
        if let Some(dir) = value(ENV_LOGS_DIR) {
            config.logs_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the proxy route.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<ProxyRoute>) -> Self {
        self.proxy = proxy;
        self
    }

    /// Enables or disables development-mode snapshots.
    #[must_use]
    pub fn with_dev_mode(mut self, dev_mode: bool, logs_dir: impl Into<PathBuf>) -> Self {
        self.dev_mode = dev_mode;
        self.logs_dir = logs_dir.into();
        self
    }
}

impl fmt::Debug for FigmaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigmaConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("proxy", &self.proxy)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("dev_mode", &self.dev_mode)
            .field("logs_dir", &self.logs_dir)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
