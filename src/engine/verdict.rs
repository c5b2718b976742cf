// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Inspection verdict over the collected area results.
//!
//! [`evaluate`] is pure: it reads the results and never changes them, so it
//! may be called any number of times with the same outcome.

use std::fmt;

use crate::config::{AreaSpec, ComponentExpectation};
use crate::engine::{AreaNo, AreaResults, AreaValidity};
use crate::observability::messages::inspection::{AreaCheckFailed, VerdictReached};
use crate::observability::messages::StructuredLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ok,
    Nok,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Ok => f.write_str("OK"),
            Verdict::Nok => f.write_str("NOK"),
        }
    }
}

/// One area that failed its check.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaFailure {
    pub area_no: AreaNo,
    pub area: AreaSpec,
    pub component: ComponentExpectation,
    pub validity: AreaValidity,
}

impl AreaFailure {
    fn message(&self) -> AreaCheckFailed<'_> {
        let found = match &self.validity {
            AreaValidity::InvalidCode(code) => Some(code.as_str()),
            _ => None,
        };
        AreaCheckFailed {
            area_no: self.area_no,
            component: &self.component,
            area: &self.area,
            found,
        }
    }

    /// Diagnostic naming the component, the rectangle and the reason.
    pub fn diagnostic(&self) -> String {
        self.message().to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectionVerdict {
    /// Validity of every area, in area-number order
    pub areas: Vec<(AreaNo, AreaValidity)>,
    pub failures: Vec<AreaFailure>,
}

impl InspectionVerdict {
    pub fn verdict(&self) -> Verdict {
        if self.failures.is_empty() {
            Verdict::Ok
        } else {
            Verdict::Nok
        }
    }

    pub fn is_ok(&self) -> bool {
        self.verdict() == Verdict::Ok
    }

    pub fn validity(&self, area_no: AreaNo) -> Option<&AreaValidity> {
        self.areas
            .iter()
            .find(|(no, _)| *no == area_no)
            .map(|(_, validity)| validity)
    }

    pub fn diagnostics(&self) -> Vec<String> {
        self.failures.iter().map(AreaFailure::diagnostic).collect()
    }

    /// Logs one warning per failed area and the verdict summary.
    pub fn log(&self) {
        for failure in &self.failures {
            failure.message().log();
        }
        VerdictReached {
            verdict: &self.verdict().to_string(),
            total: self.areas.len(),
            failed: self.failures.len(),
        }
        .log();
    }
}

/// Checks every area's read code against its expected material.
pub fn evaluate(results: &AreaResults) -> InspectionVerdict {
    let mut areas = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for (area_no, result) in results.iter() {
        let validity = result.validity();
        if !validity.is_valid() {
            failures.push(AreaFailure {
                area_no,
                area: result.area,
                component: result.component.clone(),
                validity: validity.clone(),
            });
        }
        areas.push((area_no, validity));
    }

    InspectionVerdict { areas, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverwritePolicy;
    use crate::engine::AreaResult;

    fn results(reads: &[(&str, Option<&str>)]) -> AreaResults {
        let mut results = AreaResults::new();
        for (n, (material, code)) in reads.iter().enumerate() {
            let n = n as u16 + 1;
            let mut result = AreaResult::new(
                AreaSpec::new(10 * n as u32, 10, 10 * n as u32 + 5, 20),
                ComponentExpectation::new("7001", *material, 1).unwrap(),
            );
            if let Some(code) = code {
                result.record(code, OverwritePolicy::Always);
            }
            results.insert(AreaNo::new(n).unwrap(), result);
        }
        results
    }

    #[test]
    fn test_all_valid_is_ok() {
        let verdict = evaluate(&results(&[("123", Some("ABC123")), ("999", Some("XYZ999"))]));
        assert_eq!(verdict.verdict(), Verdict::Ok);
        assert_eq!(verdict.verdict().to_string(), "OK");
        assert!(verdict.diagnostics().is_empty());
    }

    #[test]
    fn test_failures_are_exactly_the_invalid_areas() {
        let verdict = evaluate(&results(&[
            ("123", Some("ABC")),
            ("999", Some("XYZ999")),
            ("555", None),
        ]));

        assert_eq!(verdict.verdict().to_string(), "NOK");
        let failed: Vec<String> = verdict.failures.iter().map(|f| f.area_no.to_string()).collect();
        assert_eq!(failed, vec!["001", "003"]);
        assert_eq!(
            verdict.validity(AreaNo::new(2).unwrap()),
            Some(&AreaValidity::Valid)
        );
        assert_eq!(
            verdict.diagnostics(),
            vec![
                "Failed check for component [7001/123/1] in area [10x10 15x20]: invalid code found [ABC].",
                "Failed check for component [7001/555/1] in area [30x10 35x20]: code not found.",
            ]
        );
    }

    #[test]
    fn test_logged_failure_names_its_area() {
        let verdict = evaluate(&results(&[("999", Some("XYZ999")), ("123", None)]));
        let failure = &verdict.failures[0];
        let message = failure.message();

        assert_eq!(message.area_no, AreaNo::new(2).unwrap());
        assert_eq!(message.to_string(), failure.diagnostic());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let results = results(&[("123", Some("ABC")), ("999", Some("XYZ999"))]);
        let first = evaluate(&results);
        let second = evaluate(&results);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_results_are_ok() {
        assert!(evaluate(&AreaResults::new()).is_ok());
    }
}
