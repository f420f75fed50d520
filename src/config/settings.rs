//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use rand::{distr::Alphanumeric, Rng};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port, workers)
    pub server: ServerSettings,

    /// JWT authentication settings
    pub jwt: JwtSettings,

    /// Login credential policy
    pub auth: AuthSettings,

    /// Chat naming rules
    pub chat: ChatSettings,

    /// Upload storage backend
    pub storage: StorageSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,

    /// Runtime worker threads, 0 means one per core
    pub workers: usize,
}

/// JWT authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens. Generated per process when absent.
    pub secret: Option<String>,

    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,

    /// Value of the `iss` claim
    pub issuer: String,
}

/// Which rule decides whether a login credential is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CredentialPolicy {
    /// Any non-empty username is accepted
    #[default]
    Open,
    /// Username and password must match a configured account
    Accounts,
}

/// Login policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub policy: CredentialPolicy,

    /// Known accounts, only consulted by the `accounts` policy
    #[serde(default)]
    pub accounts: Vec<AccountSettings>,
}

/// A single configured account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
    pub username: String,

    /// Argon2 PHC string
    pub password_hash: String,
}

/// Chat configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    /// Maximum chat name length in characters
    pub max_name_length: usize,
}

/// Storage backend kinds for uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Memory,
    Local,
}

/// Upload storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,

    /// Target directory for the `local` backend
    pub directory: String,

    /// Prefix of the URLs handed back to clients
    pub public_base_url: String,

    /// Maximum accepted upload size in bytes
    pub max_upload_bytes: usize,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins, empty means any origin
    pub allowed_origins: Vec<String>,
}

/// Minimum required length for JWT secret (256 bits = 32 bytes)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Length of the secret generated when none is configured
const GENERATED_SECRET_LENGTH: usize = 48;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if any value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Self::builder(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=5050 -> server.port = 5050
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .build()?
            .try_deserialize::<Self>()
            .and_then(Self::validate)
    }

    /// Settings made of defaults only, with an optional signing secret.
    ///
    /// Used by tests and embedders that do not read files or environment.
    pub fn from_defaults(jwt_secret: Option<&str>) -> Result<Self, ConfigError> {
        Self::builder("test")?
            .set_override_option("jwt.secret", jwt_secret)?
            .build()?
            .try_deserialize::<Self>()
            .and_then(Self::validate)
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5050)?
            .set_default("server.workers", 0)?
            .set_default("jwt.access_token_expiry_minutes", 60)?
            .set_default("jwt.issuer", "ephemeral-chat")?
            .set_default("auth.policy", "open")?
            .set_default("chat.max_name_length", 100)?
            .set_default("storage.backend", "memory")?
            .set_default("storage.directory", "uploads")?
            .set_default("storage.public_base_url", "/files")?
            .set_default("storage.max_upload_bytes", 26_214_400_i64)? // 25MB
            .set_default("cors.allowed_origins", Vec::<String>::new())
    }

    fn validate(mut settings: Self) -> Result<Self, ConfigError> {
        match &settings.jwt.secret {
            Some(secret) if secret.len() < MIN_JWT_SECRET_LENGTH => {
                return Err(ConfigError::Message(format!(
                    "JWT secret must be at least {} characters for security. Current length: {}",
                    MIN_JWT_SECRET_LENGTH,
                    secret.len()
                )));
            }
            Some(_) => {}
            None => {
                tracing::warn!("No JWT secret configured, generating a per-process secret");
                settings.jwt.secret = Some(generate_secret());
            }
        }

        if settings.jwt.access_token_expiry_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.access_token_expiry_minutes must be positive".into(),
            ));
        }

        if settings.chat.max_name_length == 0 {
            return Err(ConfigError::Message(
                "chat.max_name_length must be positive".into(),
            ));
        }

        if settings.auth.policy == CredentialPolicy::Accounts && settings.auth.accounts.is_empty() {
            return Err(ConfigError::Message(
                "auth.policy = \"accounts\" requires at least one entry in auth.accounts".into(),
            ));
        }

        Ok(settings)
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl JwtSettings {
    /// Signing secret bytes. Always present after validation.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_deref().unwrap_or_default().as_bytes()
    }

    /// Token validity window.
    pub fn validity(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_expiry_minutes)
    }
}

fn generate_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LENGTH)
        .map(char::from)
        .collect()
}
