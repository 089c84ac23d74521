use actix_web::{post, web, HttpRequest, HttpResponse};
use tracing::warn;

use crate::{
    entities::application::CareerApplicationForm,
    entities::system_info::RequestMeta,
    errors::AppError,
    AppState,
};

/// Career application intake. The quota check runs before the body is even
/// parsed: a throttled client must not cost us any parsing or outbound
/// calls.
#[post("/careers")]
pub async fn submit_application(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let meta = RequestMeta::from_request(&req, state.config.trust_x_forwarded_for);

    let decision = state.rate_limiter.consume(&meta.ip);
    if !decision.allowed {
        warn!(
            outcome = "throttled",
            ip = %meta.ip,
            user_agent = %meta.user_agent,
            referrer = %meta.referrer,
            retry_after = ?decision.retry_after,
            "submission rate limited"
        );
        return Err(AppError::TooManyAttempts {
            retry_after: decision.retry_after,
        });
    }

    let form: CareerApplicationForm = serde_json::from_slice(&body).map_err(|e| {
        warn!(
            outcome = "bad_payload",
            ip = %meta.ip,
            user_agent = %meta.user_agent,
            "malformed submission body: {}", e
        );
        AppError::InternalError(format!("malformed request body: {e}"))
    })?;

    let response = state.career_handler.process(form, meta).await?;
    Ok(HttpResponse::Ok().json(response))
}
