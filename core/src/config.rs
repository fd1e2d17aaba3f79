use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::build::BuildCommand;
use crate::serdable::{DurationMillis, GlobPattern};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub test: TestConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestConfig {
    pub shell: PathBuf,
    pub include: GlobPattern,
    pub time_limit_ms: DurationMillis,
    pub stdout_capture_max_bytes: usize,
    pub stderr_capture_max_bytes: usize,
    pub command: Vec<BuildCommandConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildCommandConfig {
    pub pattern: GlobPattern,
    pub compile: Option<String>,
    pub artifact: String,
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "hantei.toml";

    pub fn example_toml() -> String {
        let file = Asset::get(Self::FILENAME).unwrap();
        std::str::from_utf8(file.data.as_ref()).unwrap().to_owned()
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = crate::fsutil::read_to_string(&filepath)?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file in ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
            .with_context(|| format!("Not in a hantei dir: Cannot find '{}'", Self::FILENAME))
    }

    pub fn from_file_finding_in_ancestors(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_filepath = Config::find_file_in_ancestors(cur_dir)?;
        Self::from_toml_file(config_filepath)
    }
}

impl TestConfig {
    pub fn time_limit(&self) -> Duration {
        self.time_limit_ms.into()
    }

    pub fn find_build_cmd_for_filename(&self, filename: impl AsRef<str>) -> Option<BuildCommand> {
        self.command
            .iter()
            .find(|entry| entry.pattern.matches(filename.as_ref()))
            .map(|entry| BuildCommand {
                compile: entry.compile.to_owned(),
                artifact: entry.artifact.to_owned(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_toml_should_be_parsable() {
        let toml = Config::example_toml();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();

        let Config {
            source_config_file,
            test,
        } = cfg;

        assert_eq!(source_config_file, None);
        assert_eq!(test.shell, Path::new("/bin/sh"));
        assert_eq!(test.include, GlobPattern::parse("[mM]ain.*").unwrap());
        assert_eq!(test.time_limit(), Duration::from_millis(2000));
        assert!(test.stdout_capture_max_bytes > 0);
        assert!(test.stderr_capture_max_bytes > 0);
        assert_eq!(test.command.len(), 3);
    }

    #[test]
    fn should_pick_first_matching_build_command() {
        let toml = Config::example_toml();
        let cfg = Config::from_toml(&toml).unwrap();

        let cmd = cfg.test.find_build_cmd_for_filename("main.cpp").unwrap();
        assert!(cmd.compile.is_some());

        let cmd = cfg.test.find_build_cmd_for_filename("main.py").unwrap();
        assert_eq!(cmd.compile, None);
        assert_eq!(cmd.artifact, "#{filePath}");

        assert_eq!(cfg.test.find_build_cmd_for_filename("main.zig"), None);
    }
}
