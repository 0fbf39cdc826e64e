//! The probe sequence: connectivity gate, four independent probes, then
//! the summary.
use std::io::Write;
use std::time::Duration;

use helius::methods::health_request;

use crate::app::probes::ProbeKind;
use crate::app::summary::Summary;
use crate::libs::config::{redact_key, Config, ProbeTargets};
use crate::libs::sol::{HeliusClient, RpcOutcome};
use crate::libs::writing::{cc, Printer};
use crate::{log, warn};

/// Runner lifecycle. Linear, never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    ConnectivityChecked,
    Halted,
    ProbesRun,
    SummaryPrinted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunReport {
    /// Connectivity failed; no probe was attempted.
    Halted,
    Completed(Summary),
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        match self {
            RunReport::Halted => false,
            RunReport::Completed(s) => s.all_passed(),
        }
    }
}

pub struct ProbeRunner<W: Write> {
    client: HeliusClient,
    targets: ProbeTargets,
    health_timeout: Duration,
    probe_timeout: Option<Duration>,
    endpoint_label: String,
    key_label: String,
    printer: Printer<W>,
    state: RunState,
}

impl<W: Write> ProbeRunner<W> {
    pub fn new(client: HeliusClient, config: &Config, printer: Printer<W>) -> Self {
        Self {
            client,
            targets: config.targets.clone(),
            health_timeout: config.health_timeout,
            probe_timeout: config.probe_timeout,
            endpoint_label: config.redacted_endpoint(),
            key_label: redact_key(&config.api_key),
            printer,
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn into_printer(self) -> Printer<W> {
        self.printer
    }

    fn set_state(&mut self, next: RunState) {
        log!("runner: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn print_json(&mut self, label: &str, value: &impl serde::Serialize) {
        let pretty = serde_json::to_string_pretty(value).unwrap_or_default();
        self.printer.line(&format!("{label}: {pretty}"));
    }

    pub fn print_header(&mut self) {
        self.printer.banner("HELIUS API TEST SUITE");
        self.printer.blank();
        self.printer
            .line(&format!("API Key (truncated): {}", self.key_label));
        self.printer.line(&format!("RPC URL: {}", self.endpoint_label));
    }

    /// `getHealth` with the health timeout. True only for a decoded reply
    /// with a 2xx status; transport failures are reported, not raised.
    pub async fn check_connectivity(&mut self) -> bool {
        self.printer.banner("TEST 0: API Connectivity Test");
        self.printer.blank();
        self.printer
            .line(&format!("Testing connection to: {}", self.endpoint_label));

        let request = health_request();
        let res = self
            .client
            .exchange(&request, Some(self.health_timeout))
            .await;

        let ok = match res {
            Ok(exchange) => {
                self.printer
                    .line(&format!("Status Code: {}", exchange.status));
                self.print_json("Response", &exchange.body);
                if (200..300).contains(&exchange.status) {
                    self.printer.blank();
                    self.printer.cprint("✓ API is accessible!", cc::GREEN);
                    true
                } else {
                    self.printer.blank();
                    self.printer
                        .err_print("✗ API returned non-success status");
                    false
                }
            }
            Err(e) => {
                warn!("connectivity check failed: {e}");
                self.printer.err_print(&format!("✗ Connection error: {e}"));
                false
            }
        };
        self.set_state(RunState::ConnectivityChecked);
        ok
    }

    /// Send one probe and classify the reply. Never fails: transport and
    /// decode problems come back as [`RpcOutcome::TransportFailure`].
    pub async fn run_probe(&mut self, kind: ProbeKind) -> RpcOutcome {
        self.printer.banner(kind.title());

        let target = kind.target(&self.targets).to_string();
        let request = kind.request(&self.targets);
        self.printer.blank();
        self.printer.line(&format!("{}: {target}", kind.label()));
        self.print_json("Payload", &request);

        let res = self.client.exchange(&request, self.probe_timeout).await;
        match &res {
            Ok(exchange) => {
                self.printer.blank();
                self.printer
                    .line(&format!("Status Code: {}", exchange.status));
                self.print_json("Response", &exchange.body);
            }
            Err(e) => self.printer.err_print(&format!("Error: {e}")),
        }

        let outcome = RpcOutcome::from_result(res);
        match &outcome {
            RpcOutcome::Success(_) => log!(cc::LIGHT_GREEN, "{} passed", kind.key()),
            _ => log!(cc::LIGHT_RED, "{} failed", kind.key()),
        }
        outcome
    }

    /// Whole sequence. Halts before any probe if connectivity fails;
    /// otherwise every probe runs regardless of earlier outcomes.
    pub async fn run(&mut self) -> RunReport {
        self.print_header();

        if !self.check_connectivity().await {
            self.printer.blank();
            self.printer.err_print(
                "✗ Cannot connect to API. Please check your API key and internet connection.",
            );
            self.set_state(RunState::Halted);
            return RunReport::Halted;
        }

        let mut summary = Summary::default();
        for kind in ProbeKind::ALL {
            let outcome = self.run_probe(kind).await;
            summary.push(kind, outcome);
        }
        self.set_state(RunState::ProbesRun);

        summary.print(&mut self.printer);
        self.set_state(RunState::SummaryPrinted);
        RunReport::Completed(summary)
    }
}
