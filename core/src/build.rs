use std::{
    collections::HashMap,
    ffi::OsStr,
    path::Path,
};

use tokio::process::Command;

use crate::interp::{interp, InterpError};
use crate::judge::ExecutableArtifact;

/// How to turn one source file into a runnable artifact.
/// `compile` is absent for interpreted programs and prebuilt binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub compile: Option<String>,
    pub artifact: String,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Compile error:\n{diagnostic}")]
    CompileError { diagnostic: String },

    #[error("Failed to spawn '{shell} -c {cmd}': {source}")]
    SpawnFailed {
        shell: String,
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Compiler terminated by signal")]
    CompilerKilled,

    #[error(transparent)]
    BadTemplate(#[from] InterpError),
}

impl BuildCommand {
    /// Expands `#{filePath}`-style placeholders in both the compile command
    /// and the artifact path.
    pub fn interpolate_with_program_file(
        mut self,
        filepath: impl AsRef<Path>,
    ) -> std::result::Result<Self, InterpError> {
        let vars = make_interp_vars(filepath.as_ref());
        self.compile = self.compile.map(|fmt| interp(&fmt, &vars)).transpose()?;
        self.artifact = interp(&self.artifact, &vars)?;
        Ok(self)
    }
}

fn make_interp_vars(filepath: &Path) -> HashMap<&'static str, &OsStr> {
    let file_dir = match filepath.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut m: HashMap<_, &OsStr> = HashMap::new();
    m.insert("filePath", filepath.as_os_str());
    m.insert("fileName", filepath.file_name().unwrap_or(OsStr::new("")));
    m.insert("fileDir", file_dir.as_os_str());
    m.insert("fileStem", filepath.file_stem().unwrap_or(OsStr::new("")));
    m.insert("fileExt", filepath.extension().unwrap_or(OsStr::new("")));
    m
}

/// Runs the compile command (if any) under `shell` and yields the executable
/// artifact.
///
/// A nonzero compiler exit is terminal for the whole suite: no testcase runs,
/// and the compiler's own diagnostics are carried verbatim in the error. With
/// no compile command the artifact path is used as-is and survives cleanup.
pub async fn compile(
    shell: impl AsRef<Path>,
    cmd: &BuildCommand,
) -> std::result::Result<ExecutableArtifact, BuildError> {
    let shell = shell.as_ref();

    let Some(compile_cmd) = &cmd.compile else {
        return Ok(ExecutableArtifact::pre_existing(&cmd.artifact));
    };

    let output = Command::new(shell)
        .args(["-c", compile_cmd])
        .output()
        .await
        .map_err(|e| BuildError::SpawnFailed {
            shell: shell.to_string_lossy().into_owned(),
            cmd: compile_cmd.clone(),
            source: e,
        })?;

    match output.status.code() {
        Some(0) => Ok(ExecutableArtifact::new(&cmd.artifact)),
        Some(_) => {
            // Most compilers report to stderr; fall back to stdout for the rest.
            let diagnostic = if output.stderr.is_empty() {
                &output.stdout
            } else {
                &output.stderr
            };
            Err(BuildError::CompileError {
                diagnostic: String::from_utf8_lossy(diagnostic).into_owned(),
            })
        }
        None => Err(BuildError::CompilerKilled),
    }
}
