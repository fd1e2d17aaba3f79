use std::fmt;

use super::normalize::normalize;
use super::runner::{RunOutcome, RunStatus};

/// Classified outcome of running a candidate program against one testcase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    AC,
    WA,
    /// Nonzero exit code.
    RE(i32),
    TLE,
    /// The engine itself failed for this case (launch failure, signal death).
    /// The payload is a diagnostic detail, never a signal for control flow.
    IE(String),
}

/// Payload-free variant tag of [`Verdict`], for counting and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum VerdictCode {
    AC,
    WA,
    RE,
    TLE,
    IE,
}

impl Verdict {
    pub fn code(&self) -> VerdictCode {
        match self {
            Verdict::AC => VerdictCode::AC,
            Verdict::WA => VerdictCode::WA,
            Verdict::RE(_) => VerdictCode::RE,
            Verdict::TLE => VerdictCode::TLE,
            Verdict::IE(_) => VerdictCode::IE,
        }
    }

    pub fn is_accepted(&self) -> bool {
        *self == Verdict::AC
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Derives a verdict from a raw run outcome and the expected output.
///
/// Termination status is checked before any text comparison: a timed-out or
/// signal-killed or nonzero-exit run must never be reinterpreted as a content
/// mismatch (nor as `AC`, however its stdout happens to look).
pub fn classify(outcome: &RunOutcome, expected: &str) -> Verdict {
    match outcome.status {
        RunStatus::TimedOut => Verdict::TLE,
        RunStatus::Killed => Verdict::IE("terminated unexpectedly".to_owned()),
        RunStatus::Exited(code) if code != 0 => Verdict::RE(code),
        RunStatus::Exited(_) => {
            if normalize(&outcome.stdout) == normalize(expected) {
                Verdict::AC
            } else {
                Verdict::WA
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    fn outcome(status: RunStatus, stdout: &str) -> RunOutcome {
        RunOutcome {
            stdout: stdout.to_owned(),
            stderr: String::new(),
            status,
            time: Duration::from_millis(10),
        }
    }

    #[test]
    fn should_be_ac_when_output_matches_after_normalization() {
        let o = outcome(RunStatus::Exited(0), "YES\n");
        assert_eq!(classify(&o, "YES"), Verdict::AC);
    }

    #[test]
    fn should_be_wa_when_output_differs() {
        let o = outcome(RunStatus::Exited(0), "NO\n");
        assert_eq!(classify(&o, "YES"), Verdict::WA);
    }

    #[test]
    fn should_be_re_even_if_stdout_is_correct() {
        let o = outcome(RunStatus::Exited(42), "YES\n");
        assert_eq!(classify(&o, "YES"), Verdict::RE(42));
    }

    #[test]
    fn should_be_tle_even_if_partial_stdout_is_correct() {
        let o = outcome(RunStatus::TimedOut, "YES\n");
        assert_eq!(classify(&o, "YES"), Verdict::TLE);
    }

    #[test]
    fn should_be_ie_on_signal_death() {
        let o = outcome(RunStatus::Killed, "YES\n");
        assert_eq!(
            classify(&o, "YES"),
            Verdict::IE("terminated unexpectedly".to_owned())
        );
    }

    #[test]
    fn should_tolerate_trailing_whitespace_differences() {
        let o = outcome(RunStatus::Exited(0), "8 \n8\n");
        assert_eq!(classify(&o, "8\n8"), Verdict::AC);
    }
}
