pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::path::Path;
use std::time::Duration;

use colored::Colorize as _;
use error::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::build;
use crate::config::TestConfig;
use crate::judge::{self, ProcessRunner, Report, TestCase};
use crate::style;

/// Compiles `program_file` per config, runs it against every testcase found in
/// `testcase_dir`, prints each failure's detail and a summary, and returns the
/// report. A compile failure is terminal: no testcase runs and the compiler
/// diagnostics are carried in the error.
pub async fn do_test(
    program_file: impl AsRef<Path>,
    testcase_dir: impl AsRef<Path>,
    cfg: &TestConfig,
) -> Result<Report> {
    let program_file = program_file.as_ref();
    let testcase_dir = testcase_dir.as_ref();

    let testcases = TestCase::enumerate_dir(testcase_dir).context("Failed to collect testcases")?;
    if testcases.is_empty() {
        bail!(
            "No testcase is saved in {}",
            testcase_dir.to_string_lossy()
        );
    }

    let filename = program_file
        .file_name()
        .with_context(|| format!("Not a program file path: {:?}", program_file))?
        .to_string_lossy();

    let cmd = cfg.find_build_cmd_for_filename(&filename).with_context(|| {
        format!(
            "Unconfigured build command for filename '{}' (No entry matched glob in `test.command[]`)",
            filename
        )
    })?;
    let cmd = cmd.interpolate_with_program_file(program_file)?;

    if let Some(compile_cmd) = &cmd.compile {
        log::info!("Compiling {}", filename);
        log::info!("{}", compile_cmd);
    }
    let artifact = build::compile(&cfg.shell, &cmd).await?;

    let runner = ProcessRunner::new()
        .time_limit(cfg.time_limit())
        .stdout_capture_max_bytes(cfg.stdout_capture_max_bytes)
        .stderr_capture_max_bytes(cfg.stderr_capture_max_bytes);

    log::info!("Running: {}", cmd.artifact);

    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap();
    let progress = MultiProgress::new();
    let bars: Vec<ProgressBar> = testcases
        .iter()
        .map(|t| {
            let bar = progress
                .add(ProgressBar::new_spinner())
                .with_style(spinner_style.clone())
                .with_message(format!("Testcase {} ...", t.name));
            bar.enable_steady_tick(Duration::from_millis(50));
            bar
        })
        .collect();

    let report = judge::run_suite(&runner, artifact, &testcases, |res| {
        bars[res.test_number - 1].finish_with_message(
            format!(
                "Testcase {} ... {} [{}ms]",
                res.name,
                style::judge_icon(res.verdict.code()),
                res.time.as_millis(),
            )
            .cyan()
            .to_string(),
        );
    })
    .await;
    println!();

    report
        .results()
        .iter()
        .filter(|r| !r.verdict.is_accepted())
        .for_each(style::print_test_result_detail);

    style::print_report_summary(&report);
    Ok(report)
}
