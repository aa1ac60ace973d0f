use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error_log::ErrorLog;
use crate::geo::{extract_ip, GeoClient};
use crate::messages::{GEO_FAILED, PROXY_FAILED, PROXY_SECTION_HEADER, SYSTEM_FAILED};
use crate::notify::Notifier;
use crate::proxy::ProxyClient;
use crate::system_info::SystemFacts;

/// Result of one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Geolocation and system blocks, shown to the user.
    pub visible: String,
    /// Everything in `visible` plus the VPN/proxy block, sent to the chat.
    pub full: String,
    /// Errors recovered while building the report, already written to the
    /// error log.
    pub failures: Vec<String>,
}

impl Report {
    pub fn compose(geo: &str, proxy: &str, system: &str) -> Self {
        Self {
            visible: format!("{geo}\n\n{system}"),
            full: format!("{geo}\n\n{PROXY_SECTION_HEADER}\n{proxy}\n\n{system}"),
            failures: Vec::new(),
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Produces the local system snapshot for a report.
pub type SystemSource = fn() -> anyhow::Result<SystemFacts>;

/// Runs the geolocation, proxy check, system inspection and notification
/// steps in that order.
#[derive(Clone)]
pub struct Reporter {
    geo: GeoClient,
    proxy: ProxyClient,
    notifier: Notifier,
    system: SystemSource,
    error_log: ErrorLog,
}

impl Reporter {
    pub fn new(config: &Config, error_log: ErrorLog) -> Self {
        Self {
            geo: GeoClient::new(config),
            proxy: ProxyClient::new(config),
            notifier: Notifier::new(config),
            system: SystemFacts::collect,
            error_log,
        }
    }

    /// Replace the host inspection step, e.g. with a fixed snapshot.
    pub fn with_system_source(mut self, source: SystemSource) -> Self {
        self.system = source;
        self
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Build a report. Every step that fails is replaced by its fallback
    /// text, so this never returns an error.
    #[instrument(level = "debug", skip(self))]
    pub async fn run(&self) -> Report {
        let mut failures = Vec::new();

        let geo_text = match self.geo.lookup().await {
            Ok(report) => report.to_string(),
            Err(err) => {
                failures.push(format!("Geolocation request failed: {err:#}"));
                GEO_FAILED.to_string()
            }
        };

        let ip = extract_ip(&geo_text);
        debug!(ip = %ip, "extracted address for proxy check");

        let proxy_text = match self.proxy.check(&ip).await {
            Ok(verdict) => verdict.to_string(),
            Err(err) => {
                failures.push(format!("VPN/proxy check failed: {err:#}"));
                PROXY_FAILED.to_string()
            }
        };

        let system_text = match (self.system)() {
            Ok(facts) => facts.to_string(),
            Err(err) => {
                failures.push(format!("System inspection failed: {err:#}"));
                SYSTEM_FAILED.to_string()
            }
        };

        for failure in &failures {
            self.error_log.record(failure);
        }

        let mut report = Report::compose(&geo_text, &proxy_text, &system_text);
        report.failures = failures;

        if !report.full.is_empty() {
            if let Err(err) = self.notifier.send(&report.full).await {
                debug!(error = %err, "report delivery skipped");
            }
        }

        info!(failures = report.failures.len(), "report ready");
        report
    }
}
