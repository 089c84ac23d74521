use actix_web::test::TestRequest;

use careers_backend::{
    entities::system_info::{ClientSystemInfo, RequestMeta, SystemInfo},
    external::ip_info::IpInfo,
    utils::{get_client_ip::get_client_ip, user_agent::parse_user_agent},
};

const CHROME_WINDOWS: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) \
                             AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 \
                             Mobile/15E148 Safari/604.1";

#[actix_web::test]
async fn forwarded_for_chain_takes_the_first_hop() {
    let req = TestRequest::default()
        .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1"))
        .to_http_request();
    assert_eq!(get_client_ip(&req, true), "203.0.113.7");
}

#[actix_web::test]
async fn real_ip_header_is_the_fallback() {
    let req = TestRequest::default()
        .insert_header(("x-real-ip", "203.0.113.9"))
        .to_http_request();
    assert_eq!(get_client_ip(&req, true), "203.0.113.9");
}

#[actix_web::test]
async fn proxy_headers_are_ignored_when_untrusted() {
    let req = TestRequest::default()
        .insert_header(("x-forwarded-for", "203.0.113.7"))
        .to_http_request();
    // No peer address on a bare test request either.
    assert_eq!(get_client_ip(&req, false), "Unknown");
}

#[actix_web::test]
async fn request_meta_defaults_absent_headers() {
    let req = TestRequest::default().to_http_request();
    let meta = RequestMeta::from_request(&req, true);
    assert_eq!(meta.ip, "Unknown");
    assert_eq!(meta.user_agent, "Unknown");
    assert_eq!(meta.referrer, "Direct");
}

#[test]
fn classifies_chrome_on_windows() {
    let ua = parse_user_agent(CHROME_WINDOWS);
    assert_eq!(ua.browser, "Chrome");
    assert_eq!(ua.browser_version, "120.0.0.0");
    assert_eq!(ua.os, "Windows");
    assert_eq!(ua.os_version, "10.0");
    assert_eq!(ua.device, "desktop");
}

#[test]
fn classifies_safari_on_iphone() {
    let ua = parse_user_agent(SAFARI_IPHONE);
    assert_eq!(ua.browser, "Safari");
    assert_eq!(ua.browser_version, "17.5");
    assert_eq!(ua.os, "iOS");
    assert_eq!(ua.os_version, "17.5");
    assert_eq!(ua.device, "mobile");
}

#[test]
fn unrecognized_agents_degrade_to_sentinels() {
    let ua = parse_user_agent("curl/8.5.0");
    assert_eq!(ua.browser, "Unknown");
    assert_eq!(ua.os, "Unknown");
    assert_eq!(ua.device, "desktop");
}

#[test]
fn client_fields_fill_in_but_server_fields_win() {
    let meta = RequestMeta {
        ip: "203.0.113.7".to_string(),
        user_agent: CHROME_WINDOWS.to_string(),
        referrer: "Direct".to_string(),
    };
    let client = ClientSystemInfo {
        screen_resolution: Some("1920x1080".to_string()),
        time_zone: Some("Europe/Istanbul".to_string()),
        ..Default::default()
    };

    let info = SystemInfo::collect(
        &meta,
        parse_user_agent(&meta.user_agent),
        IpInfo {
            isp: "TurkNet".to_string(),
            asn: "AS12735".to_string(),
        },
        Some(client),
    );

    // Client-only fields are taken from the client report.
    assert_eq!(info.screen_resolution, "1920x1080");
    assert_eq!(info.time_zone, "Europe/Istanbul");
    // Absent client fields degrade to the sentinel.
    assert_eq!(info.language, "Bilinmiyor");
    assert_eq!(info.current_url, "Bilinmiyor");
    // Server-observed fields come from the request, not the client report.
    assert_eq!(info.ip_address, "203.0.113.7");
    assert_eq!(info.browser, "Chrome");
    assert_eq!(info.isp, "TurkNet");
}

#[test]
fn client_report_is_optional() {
    let meta = RequestMeta {
        ip: "127.0.0.1".to_string(),
        user_agent: "Unknown".to_string(),
        referrer: "Direct".to_string(),
    };
    let info = SystemInfo::collect(
        &meta,
        parse_user_agent(&meta.user_agent),
        IpInfo::unknown(),
        None,
    );

    assert_eq!(info.screen_resolution, "Bilinmiyor");
    assert_eq!(info.local_date_time, "Bilinmiyor");
    assert_eq!(info.isp, "Bilinmiyor");
    assert_eq!(info.device, "desktop");
}
