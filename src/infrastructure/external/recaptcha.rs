use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// Verifies a client-supplied challenge token. Must fail closed: transport
/// errors, timeouts and malformed upstream responses all count as rejected.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> bool;
}

#[derive(Debug, Clone)]
pub struct RecaptchaClient {
    client: reqwest::Client,
    siteverify_endpoint: Url,
    secret: String,
}

#[derive(Serialize)]
struct SiteverifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
}

#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default)]
    score: Option<f64>,
}

impl RecaptchaClient {
    pub fn new(client: reqwest::Client, siteverify_endpoint: Url, secret: String) -> Self {
        Self {
            client,
            siteverify_endpoint,
            secret,
        }
    }

    async fn siteverify(&self, token: &str) -> anyhow::Result<SiteverifyResponse> {
        let response = self
            .client
            .post(self.siteverify_endpoint.clone())
            .form(&SiteverifyRequest {
                secret: &self.secret,
                response: token,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<SiteverifyResponse>()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaClient {
    async fn verify(&self, token: &str) -> bool {
        if self.secret.is_empty() {
            warn!("reCAPTCHA secret is not configured, rejecting submission");
            return false;
        }

        match self.siteverify(token).await {
            Ok(result) => {
                if !result.success {
                    warn!(score = ?result.score, "reCAPTCHA siteverify rejected token");
                }
                result.success
            }
            Err(e) => {
                warn!("reCAPTCHA siteverify call failed: {}", e);
                false
            }
        }
    }
}
