use std::fmt;
use std::time::Duration;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::http::{get_json, text_field};
use crate::messages::{real_ip_line, PROXY_DETECTED, PROXY_NOT_DETECTED, REAL_IP_NOT_FOUND};

/// Outcome of a VPN/proxy lookup for one address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyVerdict {
    pub detected: bool,
    pub asn: Option<String>,
    pub provider: Option<String>,
    pub real_ip: Option<String>,
}

impl ProxyVerdict {
    /// Build a verdict from a proxycheck response.
    ///
    /// The service keys its answer by the queried address. When that entry is
    /// missing (an empty or invalid address, an error status) the address is
    /// reported as not detected.
    pub fn from_json(value: &Value, ip: &str) -> Self {
        let Some(entry) = value.get(ip).filter(|e| e.is_object()) else {
            debug!(ip, status = ?text_field(value, "status"), "no entry for address");
            return Self::default();
        };

        Self {
            detected: text_field(entry, "proxy").as_deref() == Some("yes"),
            asn: text_field(entry, "asn"),
            provider: text_field(entry, "provider"),
            real_ip: text_field(entry, "real").filter(|r| !r.is_empty()),
        }
    }
}

impl fmt::Display for ProxyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.detected {
            return write!(f, "{PROXY_NOT_DETECTED}");
        }
        writeln!(f, "{PROXY_DETECTED}")?;
        writeln!(f, "ASN: {}", self.asn.as_deref().unwrap_or(""))?;
        writeln!(f, "Provider: {}", self.provider.as_deref().unwrap_or(""))?;
        match &self.real_ip {
            Some(ip) => write!(f, "{}", real_ip_line(ip)),
            None => write!(f, "{REAL_IP_NOT_FOUND}"),
        }
    }
}

#[derive(Clone)]
pub struct ProxyClient {
    base_url: String,
    timeout: Duration,
}

impl ProxyClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.endpoints.proxy.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn check(&self, ip: &str) -> Result<ProxyVerdict> {
        let url = format!("{}/v2/{}", self.base_url, ip);
        let body = get_json(
            &url,
            &[("vpn", "1"), ("asn", "1"), ("risk", "1")],
            self.timeout,
        )
        .await?;
        let verdict = ProxyVerdict::from_json(&body, ip);
        debug!(detected = verdict.detected, "proxy check finished");
        Ok(verdict)
    }
}
