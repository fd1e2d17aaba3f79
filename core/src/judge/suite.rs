use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::fsutil;

use super::report::{Report, TestResult};
use super::runner::ProcessRunner;
use super::testcase::TestCase;
use super::verdict::{classify, Verdict};

/// A runnable binary, exclusively owned by the suite for the duration of one
/// run and removed (best-effort) when the run ends.
///
/// An artifact the engine did not produce (a prebuilt binary or an interpreted
/// program run in place) is marked `pre_existing` and survives cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableArtifact {
    path: PathBuf,
    pre_existing: bool,
}

impl ExecutableArtifact {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pre_existing: false,
        }
    }

    pub fn pre_existing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pre_existing: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal. Failures are logged, never surfaced: cleanup must
    /// not mask an already-computed report.
    pub fn remove(self) {
        if self.pre_existing {
            return;
        }
        if let Err(e) = fsutil::remove_file(&self.path) {
            log::warn!("Failed to remove artifact: {}", e);
        }
    }
}

/// Runs every testcase in order against `artifact` and collects a [`Report`].
///
/// Cases run sequentially, each under the runner's own time limit. A failure
/// to run one case (e.g. the executable is missing) is judged `IE` for that
/// case and the remaining cases still run. The artifact is removed when the
/// suite ends, whatever the outcome; an empty testcase list yields an empty
/// report without spawning anything.
///
/// `on_case_judged` is invoked once per case, in order, right after the case
/// is judged. Presentation belongs to the caller; the suite itself prints
/// nothing.
pub async fn run_suite<F>(
    runner: &ProcessRunner,
    artifact: ExecutableArtifact,
    testcases: &[TestCase],
    mut on_case_judged: F,
) -> Report
where
    F: FnMut(&TestResult),
{
    let mut report = Report::new();

    for (i, t) in testcases.iter().enumerate() {
        let test_number = i + 1;
        let result = match runner.run(artifact.path(), &t.input).await {
            Ok(outcome) => TestResult {
                test_number,
                name: t.name.clone(),
                verdict: classify(&outcome, &t.expected),
                input: t.input.clone(),
                expected: t.expected.clone(),
                stdout: outcome.stdout,
                stderr: outcome.stderr,
                explanation: t.explanation.clone(),
                time: outcome.time,
            },
            Err(e) => {
                log::warn!("Testcase {} ({}): {:#}", test_number, t.name, e);
                TestResult {
                    test_number,
                    name: t.name.clone(),
                    verdict: Verdict::IE(format!("{:#}", e)),
                    input: t.input.clone(),
                    expected: t.expected.clone(),
                    stdout: String::new(),
                    stderr: String::new(),
                    explanation: t.explanation.clone(),
                    time: Duration::ZERO,
                }
            }
        };
        on_case_judged(&result);
        report.push(result);
    }

    artifact.remove();
    report
}

#[cfg(test)]
#[cfg(unix)]
mod test {
    use super::*;
    use crate::judge::verdict::VerdictCode;
    use std::{fs, os::unix::fs::PermissionsExt as _};

    fn script(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hantei-suite-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn should_judge_all_cases_in_order() {
        // Echoes its input doubled only for even inputs; AC/WA mix.
        let exe = script("double.sh", r#"read x; echo $((x * 2))"#);
        let testcases = vec![
            TestCase::new("sample1", "1\n", "2\n"),
            TestCase::new("sample2", "3\n", "999\n"),
            TestCase::new("sample3", "5\n", "10\n"),
        ];

        let mut seen = Vec::new();
        let report = run_suite(
            &ProcessRunner::new(),
            ExecutableArtifact::pre_existing(&exe),
            &testcases,
            |r| seen.push(r.test_number),
        )
        .await;

        assert_eq!(report.total(), 3);
        assert_eq!(report.passed(), 2);
        assert_eq!(seen, vec![1, 2, 3]);

        let verdicts: Vec<_> = report.results().iter().map(|r| r.verdict.code()).collect();
        assert_eq!(
            verdicts,
            vec![VerdictCode::AC, VerdictCode::WA, VerdictCode::AC]
        );
    }

    #[tokio::test]
    async fn missing_executable_should_yield_ie_for_every_case_without_aborting() {
        let testcases = vec![
            TestCase::new("sample1", "1\n", "2\n"),
            TestCase::new("sample2", "2\n", "4\n"),
        ];
        let report = run_suite(
            &ProcessRunner::new(),
            ExecutableArtifact::pre_existing("/no/such/executable"),
            &testcases,
            |_| {},
        )
        .await;

        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 0);
        for r in report.results() {
            assert_eq!(r.verdict.code(), VerdictCode::IE);
        }
    }

    #[tokio::test]
    async fn empty_testcase_list_should_yield_empty_report() {
        let report = run_suite(
            &ProcessRunner::new(),
            ExecutableArtifact::pre_existing("/no/such/executable"),
            &[],
            |_| panic!("no case should be judged"),
        )
        .await;
        assert_eq!(report.total(), 0);
        assert_eq!(report.passed(), 0);
    }

    #[tokio::test]
    async fn should_remove_built_artifact_after_run() {
        let exe = script("to_remove.sh", "exit 0");
        let report = run_suite(
            &ProcessRunner::new(),
            ExecutableArtifact::new(&exe),
            &[TestCase::new("sample1", "", "")],
            |_| {},
        )
        .await;
        assert_eq!(report.total(), 1);
        assert!(!exe.exists());
    }

    #[tokio::test]
    async fn should_keep_pre_existing_artifact_after_run() {
        let exe = script("to_keep.sh", "exit 0");
        run_suite(
            &ProcessRunner::new(),
            ExecutableArtifact::pre_existing(&exe),
            &[TestCase::new("sample1", "", "")],
            |_| {},
        )
        .await;
        assert!(exe.exists());
    }

    #[test]
    fn removing_missing_artifact_should_not_panic() {
        ExecutableArtifact::new("/no/such/artifact").remove();
    }
}
