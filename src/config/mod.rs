use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub uploads: UploadConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_resume_dir")]
    pub resume_dir: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma separated list of origins, or `*`.
    #[serde(default = "default_cors_origins")]
    pub origins: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> u32 {
    10
}

fn default_expiry_hours() -> u64 {
    12
}

fn default_resume_dir() -> String {
    "uploads/resumes".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_cors_origins() -> String {
    "*".to_string()
}

impl CorsConfig {
    /// `None` means any origin is allowed.
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .origins
            .split(',')
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Hosting platforms hand these over as flat variables.
        let config = Self::defaults()?
            .add_source(config::Environment::default().separator("__"))
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("cors.origins", std::env::var("CORS_ORIGINS").ok())?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Built-in defaults only, ignoring `.env` and the environment.
    pub fn from_defaults() -> anyhow::Result<Self> {
        Ok(Self::defaults()?.build()?.try_deserialize()?)
    }

    fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "postgres://localhost/flexi_careers")?
            .set_default("database.max_connections", 10)?
            .set_default("jwt.secret", "development-secret-change-in-production")?
            .set_default("jwt.expiry_hours", 12)?
            .set_default("uploads.resume_dir", "uploads/resumes")?
            .set_default("uploads.max_bytes", 10 * 1024 * 1024)?
            .set_default("cors.origins", "*")?
            .set_default("log.json", false)?)
    }
}
