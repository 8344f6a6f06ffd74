//! # Console Reporting
//!
//! Renders the outcome of an aggregation pass for standard output: one
//! employer/title/url block per record, or a fixed no-results line when
//! every source came back empty. Sources that failed outright are listed
//! after the records so a silent source is distinguishable from a source
//! with zero matches.
//!
//! Rendering is a pure function over the outcome so the exact output can
//! be asserted in tests; `print` is the thin stdout wrapper used by main.

use std::fmt::Write;

use crate::finder::AggregateOutcome;

const HEADER: &str = "🎓 Current working student openings:";
const NO_RESULTS: &str = "🚫 No working student openings found.";

/// Render the full report as one string
pub fn render(outcome: &AggregateOutcome) -> String {
    let mut out = String::new();

    if outcome.records.is_empty() {
        let _ = writeln!(out, "{NO_RESULTS}");
    } else {
        let _ = writeln!(out, "{HEADER}");
        let _ = writeln!(out);

        for record in &outcome.records {
            match &record.location {
                Some(location) => {
                    let _ = writeln!(out, "[{}] {} ({location})", record.employer, record.title);
                }
                None => {
                    let _ = writeln!(out, "[{}] {}", record.employer, record.title);
                }
            }
            let _ = writeln!(out, "{}", record.url);
            let _ = writeln!(out);
        }
    }

    for (employer, error) in &outcome.failures {
        let _ = writeln!(out, "⚠️ {employer} could not be fetched: {error}");
    }

    out
}

/// Print the report to stdout
pub fn print(outcome: &AggregateOutcome) {
    print!("{}", render(outcome));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::JobRecord;

    #[test]
    fn renders_one_block_per_record_in_order() {
        let outcome = AggregateOutcome {
            records: vec![
                JobRecord::new("Isar Aerospace", "Werkstudent Avionics", "https://a.example/1"),
                JobRecord::new("BMW", "Werkstudent IT", "https://b.example/2").with_location("Munich"),
            ],
            failures: vec![],
        };

        let report = render(&outcome);

        let first = report.find("[Isar Aerospace] Werkstudent Avionics").unwrap();
        let second = report.find("[BMW] Werkstudent IT (Munich)").unwrap();
        assert!(first < second);
        assert!(report.contains("https://a.example/1"));
        assert!(report.contains("https://b.example/2"));
        assert!(!report.contains(NO_RESULTS));
    }

    #[test]
    fn empty_outcome_renders_only_the_no_results_line() {
        let outcome = AggregateOutcome {
            records: vec![],
            failures: vec![],
        };

        let report = render(&outcome);

        assert_eq!(report, format!("{NO_RESULTS}\n"));
    }

    #[test]
    fn failed_sources_are_listed_even_without_records() {
        let outcome = AggregateOutcome {
            records: vec![],
            failures: vec![(
                "BMW".to_string(),
                FetchError::Malformed {
                    url: "https://b.example".to_string(),
                    reason: "bad payload".to_string(),
                },
            )],
        };

        let report = render(&outcome);

        assert!(report.contains(NO_RESULTS));
        assert!(report.contains("BMW could not be fetched"));
    }
}
