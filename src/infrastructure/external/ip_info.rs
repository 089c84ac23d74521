use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::entities::system_info::UNKNOWN_TR;

/// Best-effort network descriptor of a client address.
#[derive(Debug, Clone)]
pub struct IpInfo {
    pub isp: String,
    pub asn: String,
}

impl IpInfo {
    pub fn unknown() -> Self {
        IpInfo {
            isp: UNKNOWN_TR.to_string(),
            asn: UNKNOWN_TR.to_string(),
        }
    }

    fn localhost() -> Self {
        IpInfo {
            isp: "Localhost".to_string(),
            asn: "Localhost".to_string(),
        }
    }
}

/// Resolves ISP/ASN for a client address. Implementations must never fail:
/// any lookup problem degrades to sentinel values.
#[async_trait]
pub trait IpLookup: Send + Sync {
    async fn lookup(&self, ip: &str) -> IpInfo;
}

#[derive(Debug, Clone)]
pub struct IpApiClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    isp: Option<String>,
    #[serde(default)]
    org: Option<String>,
    #[serde(default, rename = "as")]
    asn: Option<String>,
}

impl IpApiClient {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    async fn fetch(&self, ip: &str) -> anyhow::Result<IpApiResponse> {
        let url = format!(
            "{}/{}?fields=status,message,isp,as,org",
            self.endpoint.trim_end_matches('/'),
            ip
        );
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<IpApiResponse>()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl IpLookup for IpApiClient {
    async fn lookup(&self, ip: &str) -> IpInfo {
        // Loopback clients are local test traffic, skip the outbound call.
        if ip == "::1" || ip == "127.0.0.1" {
            return IpInfo::localhost();
        }

        match self.fetch(ip).await {
            Ok(data) if data.status == "success" => IpInfo {
                isp: data
                    .isp
                    .filter(|s| !s.is_empty())
                    .or(data.org.filter(|s| !s.is_empty()))
                    .unwrap_or_else(|| UNKNOWN_TR.to_string()),
                asn: data
                    .asn
                    .as_deref()
                    .and_then(|s| s.split_whitespace().next())
                    .map(str::to_string)
                    .unwrap_or_else(|| UNKNOWN_TR.to_string()),
            },
            Ok(_) => IpInfo::unknown(),
            Err(e) => {
                warn!("IP lookup failed for {}: {}", ip, e);
                IpInfo::unknown()
            }
        }
    }
}
