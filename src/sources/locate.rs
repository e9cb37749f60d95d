//! Location parsing and source/target file lookup.
use std::path::{Path, PathBuf};

use log::{debug, warn};
use url::Url;

use crate::error::Error;

const FILE_SCHEME: &str = "file://";

/// Where a source lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Local(PathBuf),
    Remote(Url),
}

impl Location {
    pub fn parse(location: &str) -> Result<Self, Error> {
        let has_file_scheme = location
            .get(..FILE_SCHEME.len())
            .map_or(false, |scheme| scheme.eq_ignore_ascii_case(FILE_SCHEME));
        if has_file_scheme {
            return Ok(Location::Local(PathBuf::from(&location[FILE_SCHEME.len()..])));
        }

        let path = Path::new(location);
        if path.is_dir() {
            return Ok(Location::Local(path.to_path_buf()));
        }

        Ok(Location::Remote(Url::parse(location)?))
    }

    /// Directory holding the source files.
    ///
    /// Remote locations resolve to `<cache_dir>/<hash>`, descending into a lone sub-folder
    /// (archives often extract into one).
    pub fn dir(&self, cache_dir: &Path, hash: &str) -> Result<PathBuf, Error> {
        match self {
            Location::Local(path) => {
                if !path.is_dir() {
                    return Err(Error::Config(format!("{:?} is not a directory", path)));
                }
                Ok(path.clone())
            }
            Location::Remote(url) => {
                let dir = cache_dir.join(hash);
                if !dir.is_dir() {
                    return Err(Error::Config(format!(
                        "{} is not in the cache ({:?}): fetch and extract it first",
                        url, dir
                    )));
                }
                let (files, subdirs) = list_dir(&dir)?;
                match (files.is_empty(), subdirs.as_slice()) {
                    (true, [single]) => {
                        debug!("{}: using sub-folder {:?}", url, single);
                        Ok(single.clone())
                    }
                    _ => Ok(dir),
                }
            }
        }
    }
}

/// (files, directories) of `dir`, sorted.
fn list_dir(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), Error> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        } else if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    dirs.sort();
    Ok((files, dirs))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Pick a candidate file, preferring `role` naming (`source.txt`) over the language code suffix (`corpus.en`).
fn pick(files: &[PathBuf], role: &str, lang: &str) -> Option<PathBuf> {
    let suffix = format!(".{}", lang.to_lowercase());
    let by_role: Vec<&PathBuf> = files
        .iter()
        .filter(|f| file_name(f).contains(role))
        .collect();
    let candidates = if by_role.is_empty() {
        files
            .iter()
            .filter(|f| file_name(f).ends_with(&suffix))
            .collect()
    } else {
        by_role
    };

    if candidates.len() > 1 {
        warn!(
            "several {} candidates: {:?}, using {:?}",
            role, candidates, candidates[0]
        );
    }
    candidates.first().map(|p| p.to_path_buf())
}

/// Find the (source, target) files in `dir`.
pub fn locate_pair(dir: &Path, source_lang: &str, target_lang: &str) -> Result<(PathBuf, PathBuf), Error> {
    let (files, _) = list_dir(dir)?;
    let source = pick(&files, "source", source_lang);
    let target = pick(&files, "target", target_lang);

    match (source, target) {
        (Some(s), Some(t)) if s != t => Ok((s, t)),
        _ => Err(Error::Config(format!(
            "cannot find a source and a target file in {:?} (expected source.txt/target.txt or *.{}/*.{})",
            dir, source_lang, target_lang
        ))),
    }
}
