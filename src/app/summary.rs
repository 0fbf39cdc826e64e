use std::io::Write;

use crate::app::probes::ProbeKind;
use crate::libs::sol::RpcOutcome;
use crate::libs::writing::{cc, Printer};

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub kind: ProbeKind,
    pub outcome: RpcOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub results: Vec<ProbeResult>,
}

impl Summary {
    pub fn push(&mut self, kind: ProbeKind, outcome: RpcOutcome) {
        self.results.push(ProbeResult { kind, outcome });
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.passed()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn outcome(&self, kind: ProbeKind) -> Option<&RpcOutcome> {
        self.results
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| &r.outcome)
    }

    pub fn print<W: Write>(&self, printer: &mut Printer<W>) {
        printer.banner("TEST SUMMARY");
        for r in &self.results {
            match r.outcome.error_text() {
                None => printer.cprint(&format!("✓ PASSED: {}", r.kind.key()), cc::GREEN),
                Some(err) => {
                    printer.cprint(&format!("✗ FAILED: {}", r.kind.key()), cc::RED);
                    printer.line(&format!("  Error: {err}"));
                }
            }
        }
        printer.blank();
        printer.cprint(
            &format!("Total: {}/{} tests passed", self.passed(), self.total()),
            cc::BOLD,
        );
        printer.rule();
        printer.blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prints_per_probe_lines_and_total() {
        let mut s = Summary::default();
        s.push(ProbeKind::TokenSupply, RpcOutcome::Success(json!({"result": 1})));
        s.push(
            ProbeKind::Asset,
            RpcOutcome::RpcError {
                code: Some(-1),
                message: "not found".into(),
            },
        );
        s.push(
            ProbeKind::TokenAccountsByOwner,
            RpcOutcome::TransportFailure("request timed out".into()),
        );

        let mut p = Printer::new(Vec::new(), false);
        s.print(&mut p);
        let out = String::from_utf8(p.into_inner()).unwrap();

        assert!(out.contains("✓ PASSED: token_supply"));
        assert!(out.contains("✗ FAILED: asset\n  Error: not found (code -1)"));
        assert!(out.contains("✗ FAILED: token_accounts_by_owner\n  Error: request timed out"));
        assert!(out.contains("Total: 1/3 tests passed"));
        assert!(!s.all_passed());
    }

    #[test]
    fn empty_summary_counts_zero() {
        let s = Summary::default();
        assert_eq!((s.passed(), s.total()), (0, 0));
        assert!(s.outcome(ProbeKind::Asset).is_none());
    }
}
