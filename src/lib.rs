use std::time::Duration;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, routes};
pub use infrastructure::{email, external, limiter, utils};

use email::SmtpMailer;
use external::{ip_info::IpApiClient, recaptcha::RecaptchaClient};
use limiter::rate_limiter::RateLimiterStore;
use settings::AppConfig;
use use_cases::careers::CareerHandler;

pub type AppCareerHandler = CareerHandler<SmtpMailer, RecaptchaClient, IpApiClient>;

pub struct AppState {
    pub config: AppConfig,
    pub rate_limiter: RateLimiterStore,
    pub career_handler: AppCareerHandler,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.external_timeout_secs);
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        let mailer = SmtpMailer::new(config)?;
        let captcha = RecaptchaClient::new(
            http_client.clone(),
            config.recaptcha_siteverify_endpoint.parse()?,
            config.recaptcha_secret.clone(),
        );
        let ip_lookup = IpApiClient::new(http_client, config.ip_api_endpoint.clone());

        let career_handler =
            CareerHandler::new(mailer, captcha, ip_lookup, config.intake_recipient.clone());

        let rate_limiter = RateLimiterStore::new(
            config.rate_limit_points,
            Duration::from_secs(config.rate_limit_window_secs),
            Duration::from_secs(config.rate_limit_block_secs),
        );

        Ok(AppState {
            config: config.clone(),
            rate_limiter,
            career_handler,
        })
    }
}
