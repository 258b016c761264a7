use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::template::TemplateConfig;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub key: Option<String>,
}

/// Which transport delivers rendered emails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Log the message instead of sending it
    #[default]
    Log,
    /// Send through an SMTP relay
    Smtp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Base URL for order tracking links
    #[serde(default = "default_app_url")]
    pub app_url: String,
    /// Base URL for password reset links
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default)]
    pub transport: TransportKind,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Upgrade the connection with STARTTLS
    #[serde(default = "default_starttls")]
    pub starttls: bool,
    /// Per-command timeout in seconds
    #[serde(default = "default_smtp_timeout")]
    pub timeout_seconds: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_app_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_from_address() -> String {
    "noreply@storefront.local".to_string()
}

fn default_from_name() -> String {
    "Storefront".to_string()
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_starttls() -> bool {
    true
}

fn default_smtp_timeout() -> u64 {
    10
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8082)?
            .set_default("mail.transport", "log")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // STOREFRONT__SERVER__PORT, STOREFRONT__MAIL__SMTP__HOST, etc.
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            )
            // The backend has always exported these two unprefixed
            .set_override_option("mail.app_url", env::var("APP_URL").ok())?
            .set_override_option("mail.frontend_url", env::var("FRONTEND_URL").ok())?;

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl MailConfig {
    /// The subset of mail settings the templates read
    pub fn template_config(&self) -> TemplateConfig {
        TemplateConfig {
            app_url: self.app_url.clone(),
            frontend_url: self.frontend_url.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            app_url: default_app_url(),
            frontend_url: default_frontend_url(),
            currency_symbol: default_currency_symbol(),
            from_address: default_from_address(),
            from_name: default_from_name(),
            transport: TransportKind::default(),
            smtp: SmtpConfig::default(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            starttls: default_starttls(),
            timeout_seconds: default_smtp_timeout(),
        }
    }
}
