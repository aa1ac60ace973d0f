use std::fmt;
use std::time::Duration;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::http::{get_json, text_field};

/// Label of the line carrying the bare address in the rendered report.
pub const IP_LABEL: &str = "IP:";

/// Location and network-owner metadata for the caller's public IP.
///
/// Every field is optional because the service omits whatever it does not
/// know. Missing values render as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoReport {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal: Option<String>,
    pub org: Option<String>,
    pub timezone: Option<String>,
    pub coordinates: Option<String>,
    pub hostname: Option<String>,
}

impl GeoReport {
    pub fn from_json(value: &Value) -> Self {
        Self {
            ip: text_field(value, "ip"),
            city: text_field(value, "city"),
            region: text_field(value, "region"),
            country: text_field(value, "country"),
            postal: text_field(value, "postal"),
            org: text_field(value, "org"),
            timezone: text_field(value, "timezone"),
            coordinates: text_field(value, "loc"),
            hostname: text_field(value, "hostname"),
        }
    }
}

fn or_empty(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

impl fmt::Display for GeoReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{IP_LABEL} {}", or_empty(&self.ip))?;
        writeln!(f, "City: {}", or_empty(&self.city))?;
        writeln!(f, "Region: {}", or_empty(&self.region))?;
        writeln!(f, "Country: {}", or_empty(&self.country))?;
        writeln!(f, "Postal code: {}", or_empty(&self.postal))?;
        writeln!(f, "Organization: {}", or_empty(&self.org))?;
        writeln!(f, "Timezone: {}", or_empty(&self.timezone))?;
        writeln!(
            f,
            "Location: {} (latitude, longitude)",
            or_empty(&self.coordinates)
        )?;
        write!(f, "Hostname: {}", or_empty(&self.hostname))
    }
}

#[derive(Clone)]
pub struct GeoClient {
    base_url: String,
    token: String,
    timeout: Duration,
}

impl GeoClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.endpoints.geo.trim_end_matches('/').to_string(),
            token: config.ipinfo_token.clone(),
            timeout: config.timeout,
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn lookup(&self) -> Result<GeoReport> {
        let url = format!("{}/json", self.base_url);
        let body = get_json(&url, &[("token", self.token.as_str())], self.timeout).await?;
        let report = GeoReport::from_json(&body);
        debug!(ip = ?report.ip, country = ?report.country, "geolocation resolved");
        Ok(report)
    }
}

/// Recover the bare address from a rendered report.
///
/// Takes the first line starting with `IP:`, removes every occurrence of the
/// label from it and trims the rest. Returns an empty string when there is no
/// such line (for example a fallback message).
pub fn extract_ip(details: &str) -> String {
    details
        .lines()
        .find(|line| line.starts_with(IP_LABEL))
        .map(|line| line.replace(IP_LABEL, "").trim().to_string())
        .unwrap_or_default()
}
