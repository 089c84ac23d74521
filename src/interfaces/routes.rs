use actix_web::web;

use crate::handlers::{careers::submit_application, home::home, system::health_check};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api")
            .service(submit_application)
    );
}
