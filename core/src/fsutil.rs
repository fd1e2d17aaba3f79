use std::{
    fs::{self, ReadDir},
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use crate::serdable::GlobPattern;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot read file '{0}': {1}")]
    ReadFile(PathBuf, #[source] io::Error),

    #[error("Cannot write file '{0}': {1}")]
    WriteFile(PathBuf, #[source] io::Error),

    #[error("Cannot create dir '{0}': {1}")]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("Cannot remove file '{0}': {1}")]
    RemoveFile(PathBuf, #[source] io::Error),

    #[error("Cannot read dir '{0}': {1}")]
    ReadDir(PathBuf, #[source] io::Error),
}

pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    let filepath = filepath.as_ref();
    fs::read_to_string(filepath).map_err(|e| Error::ReadFile(filepath.to_owned(), e))
}

pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    let filepath = filepath.as_ref();
    fs::write(filepath, contents).map_err(|e| Error::WriteFile(filepath.to_owned(), e))
}

pub fn mkdir_all(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::CreateDir(dir.to_owned(), e))
}

pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

pub fn remove_file(filepath: impl AsRef<Path>) -> Result<()> {
    let filepath = filepath.as_ref();
    fs::remove_file(filepath).map_err(|e| Error::RemoveFile(filepath.to_owned(), e))
}

pub fn read_dir(dir: impl AsRef<Path>) -> Result<ReadDir> {
    let dir = dir.as_ref();
    fs::read_dir(dir).map_err(|e| Error::ReadDir(dir.to_owned(), e))
}

/// Picks the newest regular file directly under `dir` whose filename matches
/// `pattern`. Entries whose metadata cannot be read are skipped.
pub fn find_most_recently_modified_file(
    dir: impl AsRef<Path>,
    pattern: &GlobPattern,
) -> Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in self::read_dir(&dir)?.filter_map(std::result::Result::ok) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(filename) = path.file_name().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        if !pattern.matches(&filename) {
            continue;
        }
        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        match &newest {
            Some((t, _)) if *t >= modified => {}
            _ => newest = Some((modified, path)),
        }
    }
    Ok(newest.map(|(_, path)| path))
}
