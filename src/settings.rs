use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default)]
    pub email_user: String,

    #[serde(default)]
    pub email_password: String,

    #[serde(default = "default_intake_recipient")]
    pub intake_recipient: String,

    #[serde(default)]
    pub recaptcha_secret: String,

    #[serde(default)]
    pub recaptcha_site_key: String,

    #[serde(default = "default_siteverify_endpoint")]
    pub recaptcha_siteverify_endpoint: String,

    #[serde(default = "default_ip_api_endpoint")]
    pub ip_api_endpoint: String,

    #[serde(default = "default_rate_limit_points")]
    pub rate_limit_points: u32,

    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,

    #[serde(default = "default_rate_limit_block")]
    pub rate_limit_block_secs: u64,

    #[serde(default = "default_trust_forwarded")]
    pub trust_x_forwarded_for: bool,

    #[serde(default = "default_external_timeout")]
    pub external_timeout_secs: u64,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Careers-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_intake_recipient() -> String {
    "info@kipras.com.tr".to_string()
}
fn default_siteverify_endpoint() -> String {
    "https://www.google.com/recaptcha/api/siteverify".to_string()
}
fn default_ip_api_endpoint() -> String {
    "http://ip-api.com/json".to_string()
}
fn default_rate_limit_points() -> u32 {
    3
}
fn default_rate_limit_window() -> u64 {
    60
}
fn default_rate_limit_block() -> u64 {
    3600
}
fn default_trust_forwarded() -> bool {
    true
}
fn default_external_timeout() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            smtp_host: default_smtp_host(),
            email_user: String::new(),
            email_password: String::new(),
            intake_recipient: default_intake_recipient(),
            recaptcha_secret: String::new(),
            recaptcha_site_key: String::new(),
            recaptcha_siteverify_endpoint: default_siteverify_endpoint(),
            ip_api_endpoint: default_ip_api_endpoint(),
            rate_limit_points: default_rate_limit_points(),
            rate_limit_window_secs: default_rate_limit_window(),
            rate_limit_block_secs: default_rate_limit_block(),
            trust_x_forwarded_for: default_trust_forwarded(),
            external_timeout_secs: default_external_timeout(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.intake_recipient.trim().is_empty() {
            errors.push("INTAKE_RECIPIENT cannot be empty");
        }
        if self.rate_limit_points == 0 {
            errors.push("RATE_LIMIT_POINTS must be at least 1");
        }
        if self.rate_limit_window_secs == 0 {
            errors.push("RATE_LIMIT_WINDOW_SECS must be at least 1");
        }
        if self.is_production() {
            if self.email_user.trim().is_empty() || self.email_password.trim().is_empty() {
                errors.push("EMAIL_USER and EMAIL_PASSWORD must be set in production");
            }
            if self.recaptcha_secret.trim().is_empty() {
                errors.push("RECAPTCHA_SECRET must be set in production");
            }
            if self.cors_origins().iter().any(|o| o == "*") {
                errors.push("Wildcard CORS (*) is not allowed in production");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("smtp_host", &self.smtp_host)
            .field("email_user", &self.email_user)
            .field("email_password", &self.email_password.redact())
            .field("intake_recipient", &self.intake_recipient)
            .field("recaptcha_secret", &self.recaptcha_secret.redact())
            .field("recaptcha_site_key", &self.recaptcha_site_key)
            .field("rate_limit_points", &self.rate_limit_points)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("rate_limit_block_secs", &self.rate_limit_block_secs)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .field("external_timeout_secs", &self.external_timeout_secs)
            .finish()
    }
}
