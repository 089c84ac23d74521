use actix_web::{test, web, App};
use serde_json::json;

use careers_backend::{routes::configure_routes, settings::AppConfig, AppState};

fn test_state() -> web::Data<AppState> {
    let config = AppConfig::default();
    web::Data::new(AppState::new(&config).expect("Failed to build test state"))
}

fn payload_without_token() -> serde_json::Value {
    json!({
        "name": "Ahmet",
        "surname": "Yılmaz",
        "email": "ahmet@example.com",
        "phone": "0532 123 45 67",
        "position": "mimar",
        "message": "Mimarlık ofisinizde çalışmak istiyorum, deneyim sahibiyim.",
        "cv": ["data:application/pdf;base64,AAAA"]
    })
}

#[actix_web::test]
async fn submission_without_token_is_rejected() {
    let app =
        test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/careers")
        .set_json(payload_without_token())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "reCAPTCHA doğrulaması başarısız");
}

#[actix_web::test]
async fn fourth_attempt_within_the_window_is_throttled() {
    let app =
        test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/careers")
            .insert_header(("x-forwarded-for", "198.51.100.9"))
            .set_json(payload_without_token())
            .to_request();
        let resp = test::call_service(&app, req).await;
        // Under quota the pipeline proceeds to the captcha gate.
        assert_eq!(resp.status().as_u16(), 400);
    }

    let req = test::TestRequest::post()
        .uri("/api/careers")
        .insert_header(("x-forwarded-for", "198.51.100.9"))
        .set_json(payload_without_token())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 429);
    assert!(resp.headers().contains_key("retry-after"));
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Çok fazla deneme yaptınız. Lütfen bir süre bekleyin."
    );
}

#[actix_web::test]
async fn malformed_json_maps_to_500_with_a_generic_message() {
    let app =
        test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/careers")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 500);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Form gönderilirken bir hata oluştu");
}

#[actix_web::test]
async fn banner_exposes_the_public_site_key_field() {
    let app =
        test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Ok");
    assert!(body.get("recaptcha_site_key").is_some());
}

#[actix_web::test]
async fn health_endpoint_reports_a_snapshot() {
    let app =
        test::init_service(App::new().app_data(test_state()).configure(configure_routes)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert!(body.get("smtp_status").is_some());
}
