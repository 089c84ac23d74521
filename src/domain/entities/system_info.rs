use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::external::ip_info::IpInfo;
use crate::utils::user_agent::UaInfo;

pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_TR: &str = "Bilinmiyor";
pub const DIRECT: &str = "Direct";

/// Header-derived facts about the inbound request. Available before any
/// external lookup runs, so early pipeline outcomes can still be logged
/// with them.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub ip: String,
    pub user_agent: String,
    pub referrer: String,
}

/// Fields only the browser can report. Everything the server can observe
/// itself is ignored here on purpose: server-side values win.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSystemInfo {
    pub screen_resolution: Option<String>,
    pub language: Option<String>,
    pub local_date_time: Option<String>,
    pub time_zone: Option<String>,
    pub time_zone_offset: Option<String>,
    pub current_url: Option<String>,
}

/// The full request context attached to a submission before delivery.
/// Construction never fails; every source that is unavailable degrades to a
/// sentinel so the rendered line set is always complete.
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub browser: String,
    pub browser_version: String,
    pub os: String,
    pub os_version: String,
    pub device: String,
    pub user_agent: String,
    pub ip_address: String,
    pub referrer: String,
    pub isp: String,
    pub asn: String,
    pub screen_resolution: String,
    pub language: String,
    pub local_date_time: String,
    pub time_zone: String,
    pub current_url: String,
    pub received_at: String,
}

impl SystemInfo {
    pub fn collect(
        meta: &RequestMeta,
        ua: UaInfo,
        ip_info: IpInfo,
        client: Option<ClientSystemInfo>,
    ) -> Self {
        let client = client.unwrap_or_default();

        SystemInfo {
            browser: ua.browser,
            browser_version: ua.browser_version,
            os: ua.os,
            os_version: ua.os_version,
            device: ua.device,
            user_agent: meta.user_agent.clone(),
            ip_address: meta.ip.clone(),
            referrer: meta.referrer.clone(),
            isp: ip_info.isp,
            asn: ip_info.asn,
            screen_resolution: or_sentinel(client.screen_resolution),
            language: or_sentinel(client.language),
            local_date_time: or_sentinel(client.local_date_time),
            time_zone: or_sentinel(client.time_zone),
            current_url: or_sentinel(client.current_url),
            received_at: Utc::now().to_rfc3339(),
        }
    }
}

fn or_sentinel(value: Option<String>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_TR.to_string())
}
