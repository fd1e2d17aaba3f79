use std::{collections::HashMap, time::Duration};

use super::verdict::{Verdict, VerdictCode};

/// Judged result of one testcase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    /// 1-based, contiguous, in testcase supply order.
    pub test_number: usize,
    pub name: String,
    pub verdict: Verdict,
    pub input: String,
    pub expected: String,
    pub stdout: String,
    pub stderr: String,
    pub explanation: Option<String>,
    pub time: Duration,
}

/// Ordered collection of [`TestResult`]s for one suite run.
/// Append-only while the run is in progress; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    results: Vec<TestResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, result: TestResult) {
        debug_assert_eq!(result.test_number, self.results.len() + 1);
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.verdict.is_accepted())
            .count()
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn count_by_code(&self) -> HashMap<VerdictCode, usize> {
        self.results.iter().fold(HashMap::new(), |mut count, r| {
            *count.entry(r.verdict.code()).or_default() += 1;
            count
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn result(test_number: usize, verdict: Verdict) -> TestResult {
        TestResult {
            test_number,
            name: format!("case{}", test_number),
            verdict,
            input: String::new(),
            expected: String::new(),
            stdout: String::new(),
            stderr: String::new(),
            explanation: None,
            time: Duration::ZERO,
        }
    }

    #[test]
    fn should_count_passed_and_total() {
        let mut report = Report::new();
        report.push(result(1, Verdict::AC));
        report.push(result(2, Verdict::WA));
        report.push(result(3, Verdict::AC));
        report.push(result(4, Verdict::RE(1)));

        assert_eq!(report.total(), 4);
        assert_eq!(report.passed(), 2);
        assert!(!report.is_all_passed());

        let count = report.count_by_code();
        assert_eq!(count[&VerdictCode::AC], 2);
        assert_eq!(count[&VerdictCode::WA], 1);
        assert_eq!(count[&VerdictCode::RE], 1);
        assert_eq!(count.get(&VerdictCode::TLE), None);
    }

    #[test]
    fn empty_report_should_be_all_passed() {
        let report = Report::new();
        assert_eq!(report.total(), 0);
        assert_eq!(report.passed(), 0);
        assert!(report.is_all_passed());
    }

    #[test]
    fn results_should_keep_insertion_order() {
        let mut report = Report::new();
        for i in 1..=5 {
            report.push(result(i, Verdict::AC));
        }
        let numbers: Vec<_> = report.results().iter().map(|r| r.test_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }
}
