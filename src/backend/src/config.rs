use anyhow::{Context, Result};
use std::{env, path::PathBuf, sync::OnceLock, time::Duration};

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,http://127.0.0.1:3000,http://localhost:3001";

/// Application configuration loaded and validated at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Language model configuration
    pub llm: LlmConfig,

    /// TLS certificate configuration, plain HTTP if absent
    pub certificate: Option<CertificateConfig>,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct CertificateConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl AppConfig {
    /// Get or load the application configuration
    ///
    /// Returns a reference to the cached configuration. On first call, it loads
    /// and validates all configuration from environment variables. Subsequent
    /// calls return the cached instance.
    ///
    /// # Panics
    /// Panics if configuration loading fails. The service cannot answer a
    /// single request without a valid configuration.
    pub fn get() -> &'static Self {
        static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();
        APP_CONFIG.get_or_init(|| {
            Self::load_internal().expect("failed to load application configuration")
        })
    }

    fn load_internal() -> Result<Self> {
        let server = ServerConfig::load()?;
        let llm = LlmConfig::load()?;
        let certificate = CertificateConfig::load()?;

        Ok(Self {
            server,
            llm,
            certificate,
        })
    }
}

impl ServerConfig {
    fn load() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("failed to parse PORT: invalid format")?;
        let allowed_origins = parse_origins(
            &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );

        Ok(Self {
            host,
            port,
            allowed_origins,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LlmConfig {
    fn load() -> Result<Self> {
        #[cfg(any(test, feature = "mock"))]
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_else(|_| "test-key".to_string());
        #[cfg(not(any(test, feature = "mock")))]
        let api_key = env::var("OPENAI_API_KEY").context("failed to get OPENAI_API_KEY")?;

        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4.1-nano".to_string());
        let temperature = env::var("OPENAI_TEMPERATURE")
            .unwrap_or_else(|_| "0.7".to_string())
            .parse::<f64>()
            .context("failed to parse OPENAI_TEMPERATURE: invalid format")?;
        let timeout = env::var("OPENAI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .context("failed to parse OPENAI_TIMEOUT_SECS: invalid format")?;

        Ok(Self {
            api_key,
            base_url,
            model,
            temperature,
            timeout,
        })
    }
}

impl CertificateConfig {
    fn load() -> Result<Option<Self>> {
        match (env::var("CERT_PATH"), env::var("KEY_PATH")) {
            (Ok(cert_path), Ok(key_path)) => Ok(Some(Self {
                cert_path: cert_path.into(),
                key_path: key_path.into(),
            })),
            (Err(_), Err(_)) => Ok(None),
            _ => anyhow::bail!("failed to load tls config: CERT_PATH and KEY_PATH must be set together"),
        }
    }
}

/// Split a comma separated origin list, dropping blanks.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
