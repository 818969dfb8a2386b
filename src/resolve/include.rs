use super::dialect::Dialect;
use super::extractor::extract;
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Files pulled in by the include directives of `config_path`, one level deep.
///
/// Relative targets are anchored at the directory of `config_path`. A
/// directory target expands to its files filtered by the dialect extension,
/// sorted by name; anything else is a glob whose matches keep glob order with
/// directories dropped. Unreadable configs, bad patterns and empty matches
/// are logged and contribute nothing.
pub fn resolve_includes(fs: &dyn FileSystem, config_path: &Path, dialect: &Dialect) -> Vec<PathBuf> {
    let Some(directive) = dialect.include else {
        return Vec::new();
    };

    let contents = match fs.read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(
                path = %config_path.display(),
                error = %e,
                "Failed to read configuration file for includes"
            );
            return Vec::new();
        }
    };

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    let mut resolved = Vec::new();

    for value in extract(&contents, dialect, &directive) {
        let target = anchor(base_dir, &value);
        let files = if fs.is_dir(&target) {
            expand_directory(fs, &target, dialect.include_extension)
        } else {
            expand_glob(fs, &target)
        };

        if files.is_empty() {
            debug!(pattern = %target.display(), "Include matched no files");
        } else {
            info!(
                pattern = %target.display(),
                count = files.len(),
                "Resolved include directive"
            );
        }
        resolved.extend(files);
    }

    resolved
}

fn anchor(base_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn expand_directory(fs: &dyn FileSystem, dir: &Path, extension: Option<&str>) -> Vec<PathBuf> {
    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Failed to list include directory");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .into_iter()
        .filter(|entry| !entry.is_dir())
        .map(|entry| entry.path)
        .filter(|path| match extension {
            Some(ext) => path.extension().is_some_and(|e| e == ext),
            None => true,
        })
        .filter(|path| fs.is_file(path))
        .collect();
    files.sort();
    files
}

fn expand_glob(fs: &dyn FileSystem, pattern: &Path) -> Vec<PathBuf> {
    let Some(pattern) = pattern.to_str() else {
        warn!(pattern = %pattern.display(), "Include pattern is not valid UTF-8");
        return Vec::new();
    };

    match fs.glob(pattern) {
        Ok(matches) => matches.into_iter().filter(|path| fs.is_file(path)).collect(),
        Err(e) => {
            warn!(pattern, error = %e, "Invalid include pattern");
            Vec::new()
        }
    }
}
