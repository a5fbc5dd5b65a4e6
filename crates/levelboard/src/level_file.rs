//! Per-level dashboard file names: `NN-<anything>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::{Result, SyncError};

/// `[0-9]` rather than `\d`: the prefix is ASCII digits only.
const LEVEL_FILE_PATTERN: &str = r"^([0-9]{2})-.*\.json$";

/// A dashboard file whose name carries a level number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFile {
    pub name: String,
    pub path: PathBuf,
    /// The two-digit prefix as written in the name.
    pub level_number: u8,
}

impl LevelFile {
    pub fn parse(dir: &Path, file_name: &str) -> Option<LevelFile> {
        let level_number = level_number(file_name)?;
        Some(LevelFile {
            name: file_name.to_string(),
            path: dir.join(file_name),
            level_number,
        })
    }

    /// Level index used inside query strings: the level number minus one.
    /// `00-` files yield `-1`.
    pub fn level_index(&self) -> i32 {
        i32::from(self.level_number) - 1
    }
}

fn level_file_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LEVEL_FILE_PATTERN).unwrap())
}

/// Level number for `file_name`, or `None` when it does not follow the
/// convention.
pub fn level_number(file_name: &str) -> Option<u8> {
    let captures = level_file_regex().captures(file_name)?;
    captures[1].parse().ok()
}

/// Level files of `dir`, sorted by file name.
///
/// Names that do not match, are not valid UTF-8, or belong to something other
/// than a regular file (after following symlinks) are skipped.
pub fn list_level_files(dir: &Path) -> Result<Vec<LevelFile>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SyncError::io(dir, e))? {
        let entry = entry.map_err(|e| SyncError::io(dir, e))?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "skipping non UTF-8 entry"),
        }
    }
    names.sort();

    let mut files = Vec::new();
    for name in names {
        let Some(file) = LevelFile::parse(dir, &name) else {
            debug!(%name, "skipping entry outside the level naming convention");
            continue;
        };
        if !file.path.is_file() {
            debug!(%name, "skipping level entry that is not a regular file");
            continue;
        }
        files.push(file);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_two_digit_prefix() {
        assert_eq!(level_number("01-arrival.json"), Some(1));
        assert_eq!(level_number("03-foo.json"), Some(3));
        assert_eq!(level_number("12-the-end.json"), Some(12));
        assert_eq!(level_number("00-.json"), Some(0));
    }

    #[test]
    fn rejects_other_names() {
        for name in [
            "00-meta.txt",
            "1-short.json",
            "123-long.json",
            "03_foo.json",
            "03-foo.json.bak",
            "arrival.json",
            "03-foo.JSON",
            "٠٣-arabic.json",
        ] {
            assert_eq!(level_number(name), None, "{name}");
        }
    }

    #[test]
    fn level_index_is_number_minus_one() {
        let file = LevelFile::parse(Path::new("/d"), "07-boss.json").unwrap();
        assert_eq!(file.level_index(), 6);
        assert_eq!(file.path, PathBuf::from("/d/07-boss.json"));
        let zero = LevelFile::parse(Path::new("/d"), "00-intro.json").unwrap();
        assert_eq!(zero.level_index(), -1);
    }
}
