//! Client configuration.
//!
//! [`KineticConfig`] carries everything a product client needs: the platform
//! server URL, basic-auth credentials, and an [`SdkOptions`] block of
//! transport and export settings. Configuration is assembled through a
//! builder; values may come from an optional YAML file, with explicit builder
//! values overriding file values key by key.
//!
//! ```yaml
//! server: https://kinetic.example.com
//! username: admin
//! password: s3cret
//! options:
//!   gateway_retry_limit: 3
//!   gateway_retry_delay: 0.5
//!   max_redirects: 2
//!   ssl_verify_mode: peer
//!   export_directory: /opt/kinetic/exports
//! ```

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::errors::{KineticError, KineticResult};

/// Default number of retries after a 502 Bad Gateway response.
pub const DEFAULT_GATEWAY_RETRY_LIMIT: u32 = 5;

/// Default pause between gateway retries.
pub const DEFAULT_GATEWAY_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default maximum number of redirects followed per request.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// TLS peer-verification behavior of the underlying HTTP client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslVerifyMode {
    /// Certificate verification is disabled entirely.
    #[default]
    None,
    /// The server certificate chain is verified against the trust anchors.
    Peer,
}

/// Transport and export options shared by every product client.
#[derive(Debug, Clone, PartialEq)]
pub struct SdkOptions {
    /// Number of times a 502 Bad Gateway response is retried.
    pub gateway_retry_limit: u32,
    /// Pause between gateway retries.
    pub gateway_retry_delay: Duration,
    /// Desired log verbosity. The SDK only emits `tracing` events; this value
    /// is carried for a subscriber installed by the embedding application.
    pub log_level: Option<String>,
    /// Desired log destination, carried for the embedding application.
    pub log_output: Option<String>,
    /// Maximum number of redirects followed per request.
    pub max_redirects: u32,
    /// PEM file with additional trust anchors.
    pub ssl_ca_file: Option<PathBuf>,
    /// TLS peer-verification mode.
    pub ssl_verify_mode: SslVerifyMode,
    /// Directory that export operations write to and import operations read
    /// from. Export and import fail when this is unset.
    pub export_directory: Option<PathBuf>,
}

impl Default for SdkOptions {
    fn default() -> Self {
        Self {
            gateway_retry_limit: DEFAULT_GATEWAY_RETRY_LIMIT,
            gateway_retry_delay: DEFAULT_GATEWAY_RETRY_DELAY,
            log_level: None,
            log_output: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            ssl_ca_file: None,
            ssl_verify_mode: SslVerifyMode::default(),
            export_directory: None,
        }
    }
}

/// Configuration for a Kinetic product client.
#[derive(Debug, Clone)]
pub struct KineticConfig {
    /// Platform server URL with any trailing slashes removed. Product clients
    /// append their own API root to this value.
    pub server: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: SecretString,
    /// Transport and export options.
    pub options: SdkOptions,
}

impl KineticConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> KineticConfigBuilder {
        KineticConfigBuilder::default()
    }
}

/// Shape of the optional YAML configuration file. Keys mirror the builder
/// methods; every key is optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    server: Option<String>,
    username: Option<String>,
    password: Option<String>,
    options: Option<OptionsFile>,
}

#[derive(Debug, Default, Deserialize)]
struct OptionsFile {
    gateway_retry_limit: Option<u32>,
    gateway_retry_delay: Option<f64>,
    log_level: Option<String>,
    log_output: Option<String>,
    max_redirects: Option<u32>,
    ssl_ca_file: Option<PathBuf>,
    ssl_verify_mode: Option<SslVerifyMode>,
    export_directory: Option<PathBuf>,
}

/// Builder for [`KineticConfig`].
#[derive(Debug, Default)]
pub struct KineticConfigBuilder {
    config_file: Option<PathBuf>,
    server: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    gateway_retry_limit: Option<u32>,
    gateway_retry_delay: Option<f64>,
    log_level: Option<String>,
    log_output: Option<String>,
    max_redirects: Option<u32>,
    ssl_ca_file: Option<PathBuf>,
    ssl_verify_mode: Option<SslVerifyMode>,
    export_directory: Option<PathBuf>,
}

impl KineticConfigBuilder {
    /// Loads defaults from a YAML configuration file. Values set explicitly
    /// on the builder override file values key by key, regardless of the
    /// order the builder methods are called in.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Sets the platform server URL.
    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    /// Sets the basic-auth username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the basic-auth password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Sets the number of retries after a 502 Bad Gateway response.
    pub fn gateway_retry_limit(mut self, limit: u32) -> Self {
        self.gateway_retry_limit = Some(limit);
        self
    }

    /// Sets the pause between gateway retries, in seconds.
    pub fn gateway_retry_delay(mut self, seconds: f64) -> Self {
        self.gateway_retry_delay = Some(seconds);
        self
    }

    /// Sets the log verbosity carried on the options surface.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Sets the log destination carried on the options surface.
    pub fn log_output(mut self, output: impl Into<String>) -> Self {
        self.log_output = Some(output.into());
        self
    }

    /// Sets the maximum number of redirects followed per request.
    pub fn max_redirects(mut self, max: u32) -> Self {
        self.max_redirects = Some(max);
        self
    }

    /// Sets a PEM file with additional trust anchors.
    pub fn ssl_ca_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ssl_ca_file = Some(path.into());
        self
    }

    /// Sets the TLS peer-verification mode.
    pub fn ssl_verify_mode(mut self, mode: SslVerifyMode) -> Self {
        self.ssl_verify_mode = Some(mode);
        self
    }

    /// Sets the directory used by export and import operations.
    pub fn export_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_directory = Some(path.into());
        self
    }

    /// Resolves the final configuration.
    ///
    /// The configuration file (when given) is loaded first, explicit builder
    /// values are layered on top, and defaults fill whatever remains. The
    /// server URL is validated and stripped of trailing slashes here, so
    /// clients can append API roots without further normalization.
    pub fn build(self) -> KineticResult<KineticConfig> {
        let file = match &self.config_file {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                serde_yaml::from_str::<ConfigFile>(&contents)?
            }
            None => ConfigFile::default(),
        };
        let file_options = file.options.unwrap_or_default();

        let server = self
            .server
            .or(file.server)
            .ok_or_else(|| KineticError::Configuration("a server URL is required".to_string()))?;
        let server = normalize_server_url(&server)?;

        let username = self
            .username
            .or(file.username)
            .ok_or_else(|| KineticError::Configuration("a username is required".to_string()))?;

        let password = self
            .password
            .or_else(|| file.password.map(SecretString::new))
            .ok_or_else(|| KineticError::Configuration("a password is required".to_string()))?;

        let retry_delay = self
            .gateway_retry_delay
            .or(file_options.gateway_retry_delay)
            .unwrap_or(DEFAULT_GATEWAY_RETRY_DELAY.as_secs_f64());
        if !retry_delay.is_finite() || retry_delay < 0.0 {
            return Err(KineticError::Configuration(format!(
                "gateway_retry_delay must be a non-negative number of seconds, got {retry_delay}"
            )));
        }

        let options = SdkOptions {
            gateway_retry_limit: self
                .gateway_retry_limit
                .or(file_options.gateway_retry_limit)
                .unwrap_or(DEFAULT_GATEWAY_RETRY_LIMIT),
            gateway_retry_delay: Duration::from_secs_f64(retry_delay),
            log_level: self.log_level.or(file_options.log_level),
            log_output: self.log_output.or(file_options.log_output),
            max_redirects: self
                .max_redirects
                .or(file_options.max_redirects)
                .unwrap_or(DEFAULT_MAX_REDIRECTS),
            ssl_ca_file: self.ssl_ca_file.or(file_options.ssl_ca_file),
            ssl_verify_mode: self
                .ssl_verify_mode
                .or(file_options.ssl_verify_mode)
                .unwrap_or_default(),
            export_directory: self.export_directory.or(file_options.export_directory),
        };

        Ok(KineticConfig {
            server,
            username,
            password,
            options,
        })
    }
}

/// Validates the server URL and strips trailing slashes.
fn normalize_server_url(server: &str) -> KineticResult<String> {
    let trimmed = server.trim_end_matches('/');
    Url::parse(trimmed)?;
    Ok(trimmed.to_string())
}
