use std::path::Path;

use crate::fsutil;

/// One input/expected-output pair, supplied by a problem source.
/// Read-only to the judge; never reformatted beyond comparison-time
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub expected: String,
    pub explanation: Option<String>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            expected: expected.into(),
            explanation: None,
        }
    }

    pub fn explanation(mut self, text: impl Into<String>) -> Self {
        self.explanation = Some(text.into());
        self
    }

    /// Collects `NAME.in`/`NAME.out` pairs directly under `dir`, ordered by
    /// name. A `.in` file without its `.out` counterpart is skipped with a
    /// warning.
    pub fn enumerate_dir(dir: impl AsRef<Path>) -> fsutil::Result<Vec<Self>> {
        let mut res = Vec::new();
        for entry in fsutil::read_dir(&dir)?.filter_map(Result::ok) {
            let in_path = entry.path();
            if !in_path.is_file() || in_path.extension() != Some("in".as_ref()) {
                continue;
            }
            let out_path = in_path.with_extension("out");
            if !out_path.is_file() {
                log::warn!("Testcase {:?} has no paired .out file; skipping", in_path);
                continue;
            }
            let name = in_path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();
            res.push(Self {
                name,
                input: fsutil::read_to_string(&in_path)?,
                expected: fsutil::read_to_string(&out_path)?,
                explanation: None,
            });
        }
        res.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(res)
    }
}
