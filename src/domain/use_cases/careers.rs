use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    email::{CareerEmail, Mailer},
    entities::application::{CareerApplication, CareerApplicationForm, CareerResponse},
    entities::system_info::{RequestMeta, SystemInfo},
    errors::AppError,
    external::{ip_info::IpLookup, recaptcha::CaptchaVerifier},
    utils::user_agent::parse_user_agent,
};

/// Intake pipeline for one submission: bot gate, metadata collection,
/// validation, delivery. The rate limiter runs before this handler is
/// reached so a throttled client never triggers the external calls below.
pub struct CareerHandler<M, V, L>
where
    M: Mailer,
    V: CaptchaVerifier,
    L: IpLookup,
{
    pub mailer: M,
    captcha: V,
    ip_lookup: L,
    recipient: String,
}

impl<M, V, L> CareerHandler<M, V, L>
where
    M: Mailer,
    V: CaptchaVerifier,
    L: IpLookup,
{
    pub fn new(mailer: M, captcha: V, ip_lookup: L, recipient: impl Into<String>) -> Self {
        CareerHandler {
            mailer,
            captcha,
            ip_lookup,
            recipient: recipient.into(),
        }
    }

    pub async fn process(
        &self,
        form: CareerApplicationForm,
        meta: RequestMeta,
    ) -> Result<CareerResponse, AppError> {
        let submission_id = Uuid::new_v4();

        // Bot gate. An absent token is rejected without an upstream call.
        let token = form
            .recaptcha_token
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string();
        if token.is_empty() {
            warn!(
                %submission_id,
                outcome = "captcha_rejected",
                ip = %meta.ip,
                user_agent = %meta.user_agent,
                referrer = %meta.referrer,
                "submission without captcha token"
            );
            return Err(AppError::RecaptchaRejected);
        }
        if !self.captcha.verify(&token).await {
            warn!(
                %submission_id,
                outcome = "captcha_rejected",
                ip = %meta.ip,
                user_agent = %meta.user_agent,
                referrer = %meta.referrer,
                "captcha token rejected"
            );
            return Err(AppError::RecaptchaRejected);
        }

        // Metadata collection never fails; lookups degrade to sentinels.
        let ua = parse_user_agent(&meta.user_agent);
        let ip_info = self.ip_lookup.lookup(&meta.ip).await;
        let system_info = SystemInfo::collect(&meta, ua, ip_info, form.system_info.clone());

        let application = match form
            .validate()
            .map_err(AppError::from)
            .and_then(|_| CareerApplication::try_from(form))
        {
            Ok(application) => application,
            Err(err) => {
                warn!(
                    %submission_id,
                    outcome = "invalid",
                    ip = %system_info.ip_address,
                    browser = %system_info.browser,
                    os = %system_info.os,
                    isp = %system_info.isp,
                    detail = %err,
                    "submission failed validation"
                );
                return Err(err);
            }
        };

        let email = CareerEmail::compose(&application, &system_info, &self.recipient);
        if let Err(e) = self.mailer.send(email).await {
            error!(
                %submission_id,
                outcome = "delivery_failed",
                ip = %system_info.ip_address,
                position = %application.position,
                error = %e,
                "failed to deliver application mail"
            );
            return Err(AppError::DeliveryError(e.to_string()));
        }

        info!(
            %submission_id,
            outcome = "accepted",
            ip = %system_info.ip_address,
            position = %application.position,
            browser = %system_info.browser,
            os = %system_info.os,
            device = %system_info.device,
            isp = %system_info.isp,
            asn = %system_info.asn,
            attachments = application.cv.len(),
            "career application delivered"
        );

        Ok(CareerResponse {
            message: "Form başarıyla gönderildi".to_string(),
            success: true,
        })
    }
}
