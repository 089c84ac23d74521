use actix_web::HttpRequest;

use crate::entities::system_info::{RequestMeta, DIRECT, UNKNOWN};

/// Extract the client's IP address from the request, considering X-Forwarded-For if trusted.
/// Falls back to X-Real-IP, then to the peer address.
/// `trust_x_forwarded_for`: whether to trust proxy-supplied headers
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> String {
    if trust_x_forwarded_for {
        if let Some(forwarded) = req.headers().get("x-forwarded-for") {
            if let Ok(s) = forwarded.to_str() {
                let first = s.split(',').next().unwrap_or("").trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
        if let Some(real_ip) = req.headers().get("x-real-ip") {
            if let Ok(s) = real_ip.to_str() {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn header_or(req: &HttpRequest, name: &str, default: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

impl RequestMeta {
    pub fn from_request(req: &HttpRequest, trust_x_forwarded_for: bool) -> Self {
        RequestMeta {
            ip: get_client_ip(req, trust_x_forwarded_for),
            user_agent: header_or(req, "user-agent", UNKNOWN),
            referrer: header_or(req, "referer", DIRECT),
        }
    }
}
