use std::{path::Path, process::Stdio, time::Duration};

use anyhow::Context as _;
use tokio::{
    io::{self, AsyncRead, AsyncReadExt as _, AsyncWriteExt as _},
    process::Command,
};

/// How the child process reached a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The process exited on its own with the given exit code.
    Exited(i32),
    /// The process was terminated by a signal before the deadline.
    Killed,
    /// The process was forcibly terminated because the wall-clock budget ran out.
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub stdout: String,
    pub stderr: String,
    pub status: RunStatus,
    /// Wall-clock time from launch until the terminal state was observed.
    pub time: Duration,
}

/// Runs one executable per call, feeding stdin and capturing stdout/stderr
/// under a wall-clock time limit.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    time_limit: Duration,
    stdout_capture_max_bytes: usize,
    stderr_capture_max_bytes: usize,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner {
    const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(2000);
    const DEFAULT_CAPTURE_MAX_BYTES: usize = 1 << 20;

    pub fn new() -> Self {
        Self {
            time_limit: Self::DEFAULT_TIME_LIMIT,
            stdout_capture_max_bytes: Self::DEFAULT_CAPTURE_MAX_BYTES,
            stderr_capture_max_bytes: Self::DEFAULT_CAPTURE_MAX_BYTES,
        }
    }

    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn stdout_capture_max_bytes(mut self, n: usize) -> Self {
        self.stdout_capture_max_bytes = n;
        self
    }

    pub fn stderr_capture_max_bytes(mut self, n: usize) -> Self {
        self.stderr_capture_max_bytes = n;
        self
    }

    pub fn get_time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Executes `executable` directly (no shell interposition), writes `input`
    /// to its stdin, and waits for a terminal state.
    ///
    /// Stdin feeding, stdout/stderr draining and exit waiting all proceed
    /// concurrently, so a program that emits output before consuming its whole
    /// input cannot deadlock on a full pipe. A spawn failure is an `Err`;
    /// everything after a successful spawn is reported as a `RunOutcome`.
    pub async fn run(&self, executable: impl AsRef<Path>, input: &str) -> anyhow::Result<RunOutcome> {
        let executable = executable.as_ref();

        let start_at = tokio::time::Instant::now();

        let mut proc = Command::new(executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn {:?}", executable))?;

        let mut stdin = proc.stdin.take().context("Failed to open stdin")?;
        let stdout = proc.stdout.take().context("Failed to open stdout")?;
        let stderr = proc.stderr.take().context("Failed to open stderr")?;

        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let res = {
            let fut_stdin = async {
                // A child that exits without reading its whole input yields a
                // broken pipe here; that is the child's business, not an error.
                let _ = stdin.write_all(input.as_bytes()).await;
                let _ = stdin.shutdown().await;
                drop(stdin); // close the pipe so the child observes EOF
            };
            let fut_stdout = drain(stdout, &mut stdout_buf, self.stdout_capture_max_bytes);
            let fut_stderr = drain(stderr, &mut stderr_buf, self.stderr_capture_max_bytes);
            let fut_exit = proc.wait();

            tokio::time::timeout(self.time_limit, async {
                let ((), res_out, res_err, res_exit) =
                    tokio::join!(fut_stdin, fut_stdout, fut_stderr, fut_exit);
                res_out.context("Failed to capture stdout")?;
                res_err.context("Failed to capture stderr")?;
                res_exit.context("Failed to wait for subprocess")
            })
            .await
        };

        let status = match res {
            Err(_elapsed) => {
                proc.kill()
                    .await
                    .unwrap_or_else(|e| log::warn!("Failed to kill timed-out process: {:#}", e));
                RunStatus::TimedOut
            }
            Ok(res) => match res?.code() {
                Some(code) => RunStatus::Exited(code),
                // No exit code means the process died to a signal.
                None => RunStatus::Killed,
            },
        };
        let time = start_at.elapsed();

        Ok(RunOutcome {
            stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
            status,
            time,
        })
    }
}

/// Copies up to `max_bytes` from `src` into `buf`, then keeps consuming the
/// rest into the void so the child never blocks on a full pipe.
async fn drain<R>(mut src: R, buf: &mut Vec<u8>, max_bytes: usize) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    io::copy(&mut (&mut src).take(max_bytes as u64), buf).await?;
    io::copy(&mut src, &mut io::sink()).await?;
    Ok(())
}
