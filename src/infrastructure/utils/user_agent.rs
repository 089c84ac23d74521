use crate::entities::system_info::UNKNOWN;

/// Browser/OS/device classification of a raw User-Agent string.
#[derive(Debug, Clone)]
pub struct UaInfo {
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    pub os_version: String,
    pub device: String,
}

/// Best-effort User-Agent classification. Ordering matters: Edge and Opera
/// also advertise "Chrome", Chrome also advertises "Safari".
pub fn parse_user_agent(ua: &str) -> UaInfo {
    let (browser, browser_version) = browser_of(ua);
    let (os, os_version) = os_of(ua);

    UaInfo {
        browser: browser.to_string(),
        browser_version,
        os: os.to_string(),
        os_version,
        device: device_of(ua).to_string(),
    }
}

fn browser_of(ua: &str) -> (&'static str, String) {
    if let Some(v) = version_after(ua, "Edg/") {
        return ("Edge", v);
    }
    if let Some(v) = version_after(ua, "OPR/") {
        return ("Opera", v);
    }
    if let Some(v) = version_after(ua, "Firefox/") {
        return ("Firefox", v);
    }
    if let Some(v) = version_after(ua, "Chrome/") {
        return ("Chrome", v);
    }
    if ua.contains("Safari/") {
        if let Some(v) = version_after(ua, "Version/") {
            return ("Safari", v);
        }
    }
    (UNKNOWN, UNKNOWN.to_string())
}

fn os_of(ua: &str) -> (&'static str, String) {
    if let Some(v) = token_after(ua, "Windows NT ", &[';', ')']) {
        return ("Windows", v);
    }
    if ua.contains("iPhone") || ua.contains("iPad") {
        let raw = token_after(ua, "CPU iPhone OS ", &[' ', ';', ')'])
            .or_else(|| token_after(ua, "CPU OS ", &[' ', ';', ')']));
        return ("iOS", raw.map_or_else(|| UNKNOWN.to_string(), |v| v.replace('_', ".")));
    }
    if let Some(v) = token_after(ua, "Android ", &[';', ')']) {
        return ("Android", v);
    }
    if let Some(v) = token_after(ua, "Mac OS X ", &[';', ')']) {
        return ("macOS", v.replace('_', "."));
    }
    if ua.contains("Linux") {
        return ("Linux", UNKNOWN.to_string());
    }
    (UNKNOWN, UNKNOWN.to_string())
}

fn device_of(ua: &str) -> &'static str {
    if ua.contains("iPad") || ua.contains("Tablet") {
        return "tablet";
    }
    if ua.contains("Mobile") || ua.contains("iPhone") {
        return "mobile";
    }
    // Android without the Mobile token is a tablet-class device
    if ua.contains("Android") {
        return "tablet";
    }
    "desktop"
}

/// Version digits right after `marker`, cut at the first space.
fn version_after(ua: &str, marker: &str) -> Option<String> {
    let rest = &ua[ua.find(marker)? + marker.len()..];
    let version: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    (!version.is_empty()).then_some(version)
}

/// Token right after `marker`, cut at the first of `stops`.
fn token_after(ua: &str, marker: &str, stops: &[char]) -> Option<String> {
    let rest = &ua[ua.find(marker)? + marker.len()..];
    let token: String = rest.chars().take_while(|c| !stops.contains(c)).collect();
    let token = token.trim().to_string();
    (!token.is_empty()).then_some(token)
}
