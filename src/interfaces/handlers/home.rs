use actix_web::{get, web, HttpResponse, Responder};

use crate::AppState;

/// Service banner. The reCAPTCHA site key is public by definition: the
/// client-side widget needs it to render the challenge.
#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Kipras Careers API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "recaptcha_site_key": state.config.recaptcha_site_key,
    }))
}
