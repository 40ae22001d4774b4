//! API connectivity check behind `--check-api`.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use super::endpoints::Endpoints;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Endpoints probed with `HEAD` once the host answers.
pub const PROBED_PATHS: [&str; 4] = [
    "/api/users/login",
    "/api/products/all",
    "/api/orders",
    "/api/cart/my-cart",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Passed(u16),
    Warning(String),
    Failed(String),
}

impl ProbeOutcome {
    /// Any status below 500 means the route exists and the server is up.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        if status < 500 {
            Self::Passed(status)
        } else {
            Self::Warning(format!("HTTP {status}"))
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub target: String,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityReport {
    pub base_url: String,
    pub probes: Vec<Probe>,
}

impl ConnectivityReport {
    /// Reachable when no probe failed outright.
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        !self.probes.iter().any(|p| p.outcome.is_failure())
    }
}

impl fmt::Display for ConnectivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "API base URL: {}", self.base_url)?;
        for probe in &self.probes {
            match &probe.outcome {
                ProbeOutcome::Passed(status) => writeln!(f, "  ok    {} ({status})", probe.target)?,
                ProbeOutcome::Warning(reason) => writeln!(f, "  warn  {} ({reason})", probe.target)?,
                ProbeOutcome::Failed(reason) => writeln!(f, "  FAIL  {} ({reason})", probe.target)?,
            }
        }
        write!(
            f,
            "{}",
            if self.is_reachable() {
                "API reachable"
            } else {
                "API unreachable"
            }
        )
    }
}

/// Runs the health check and endpoint probes.
pub struct ApiDiagnostics {
    client: Client,
    endpoints: Endpoints,
}

impl ApiDiagnostics {
    #[must_use]
    pub const fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// `GET /health`, falling back to `GET /`; then `HEAD` on each probed
    /// path. Stops at the first connection failure.
    pub async fn check_connectivity(&self) -> ConnectivityReport {
        let mut report = ConnectivityReport {
            base_url: self.endpoints.base().to_string(),
            probes: Vec::new(),
        };

        if !self.health_check(&mut report).await {
            return report;
        }

        for path in PROBED_PATHS {
            let outcome = match self
                .client
                .head(self.endpoints.url(path))
                .timeout(PROBE_TIMEOUT)
                .send()
                .await
            {
                Ok(response) => ProbeOutcome::from_status(response.status().as_u16()),
                Err(e) if e.is_connect() => ProbeOutcome::Failed(format!("connection failed: {e}")),
                Err(e) => ProbeOutcome::Warning(e.to_string()),
            };

            let failed = outcome.is_failure();
            report.probes.push(Probe {
                target: format!("HEAD {path}"),
                outcome,
            });
            if failed {
                warn!(path, "Endpoint probe could not connect");
                break;
            }
        }

        info!(reachable = report.is_reachable(), "Connectivity check finished");
        report
    }

    async fn health_check(&self, report: &mut ConnectivityReport) -> bool {
        for (target, url) in [
            ("GET /health", self.endpoints.health()),
            ("GET /", self.endpoints.url("/")),
        ] {
            let outcome = match self.client.get(url).timeout(HEALTH_TIMEOUT).send().await {
                Ok(response) if response.status().is_success() => {
                    ProbeOutcome::Passed(response.status().as_u16())
                }
                Ok(response) => ProbeOutcome::Warning(format!("HTTP {}", response.status().as_u16())),
                Err(e) => ProbeOutcome::Warning(e.to_string()),
            };

            let passed = matches!(outcome, ProbeOutcome::Passed(_));
            report.probes.push(Probe {
                target: target.to_string(),
                outcome,
            });
            if passed {
                return true;
            }
        }

        if let Some(last) = report.probes.last_mut() {
            let reason = match &last.outcome {
                ProbeOutcome::Warning(reason) | ProbeOutcome::Failed(reason) => reason.clone(),
                ProbeOutcome::Passed(status) => format!("HTTP {status}"),
            };
            last.outcome = ProbeOutcome::Failed(reason);
        }
        warn!("All health checks failed");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ProbeOutcome::from_status(200), ProbeOutcome::Passed(200));
        assert_eq!(ProbeOutcome::from_status(404), ProbeOutcome::Passed(404));
        assert_eq!(ProbeOutcome::from_status(401), ProbeOutcome::Passed(401));
        assert!(matches!(ProbeOutcome::from_status(502), ProbeOutcome::Warning(_)));
    }

    #[test]
    fn test_report_reachability_and_display() {
        let mut report = ConnectivityReport {
            base_url: "http://localhost:5000".into(),
            probes: vec![
                Probe {
                    target: "GET /health".into(),
                    outcome: ProbeOutcome::Passed(200),
                },
                Probe {
                    target: "HEAD /api/orders".into(),
                    outcome: ProbeOutcome::Warning("HTTP 503".into()),
                },
            ],
        };
        assert!(report.is_reachable());
        assert!(report.to_string().ends_with("API reachable"));

        report.probes.push(Probe {
            target: "HEAD /api/cart/my-cart".into(),
            outcome: ProbeOutcome::Failed("connection failed".into()),
        });
        assert!(!report.is_reachable());
        assert!(report.to_string().contains("FAIL  HEAD /api/cart/my-cart"));
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_health_check() {
        let endpoints = Endpoints::new("http://127.0.0.1:9").unwrap();
        let diagnostics = ApiDiagnostics::new(Client::new(), endpoints);

        let report = diagnostics.check_connectivity().await;

        assert!(!report.is_reachable());
        assert_eq!(report.probes.len(), 2);
    }
}
