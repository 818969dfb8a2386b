//! Compose file discovery on disk

use crate::fs::FileSystem;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

pub const COMPOSE_FILE_NAMES: &[&str] = &[
    "docker-compose.yml",
    "docker-compose.yaml",
    "compose.yml",
    "compose.yaml",
];

pub fn is_compose_file(name: &str) -> bool {
    COMPOSE_FILE_NAMES.contains(&name)
}

/// Normal components below the root, so `/home/a` has depth 2
fn depth(path: &Path) -> usize {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
}

/// Walk `roots` for compose files, skipping anything deeper than `max_depth`.
///
/// Directories that cannot be listed are skipped along with their subtree.
/// Symlinks are not followed.
pub fn discover_compose_files(fs: &dyn FileSystem, roots: &[PathBuf], max_depth: usize) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for root in roots {
        if !fs.is_dir(root) {
            debug!(path = %root.display(), "Compose search root does not exist");
            continue;
        }
        walk(fs, root, max_depth, &mut found);
    }

    info!(count = found.len(), "Compose file discovery complete");
    found
}

fn walk(fs: &dyn FileSystem, dir: &Path, max_depth: usize, found: &mut Vec<PathBuf>) {
    if depth(dir) > max_depth {
        return;
    }

    let mut entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "Skipping unreadable directory");
            return;
        }
    };
    entries.sort_by(|a, b| a.path.cmp(&b.path));

    for entry in entries {
        if entry.is_dir() {
            walk(fs, entry.path(), max_depth, found);
        } else if entry.is_file()
            && is_compose_file(entry.file_name())
            && depth(entry.path()) <= max_depth
        {
            info!(path = %entry.path().display(), "Found docker-compose file");
            found.push(entry.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn roots() -> Vec<PathBuf> {
        vec![
            PathBuf::from("/opt"),
            PathBuf::from("/srv"),
            PathBuf::from("/home"),
        ]
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_are_not_walked() {
        use crate::fs::RealFileSystem;

        let temp = tempfile::TempDir::new().unwrap();
        let app = temp.path().join("app");
        std::fs::create_dir(&app).unwrap();
        std::fs::write(app.join("compose.yaml"), "services: {}\n").unwrap();
        std::os::unix::fs::symlink(&app, temp.path().join("linked")).unwrap();

        let found = discover_compose_files(&RealFileSystem::new(), &[temp.path().to_path_buf()], 32);
        assert_eq!(found, vec![app.join("compose.yaml")]);
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(Path::new("/")), 0);
        assert_eq!(depth(Path::new("/home/a/b")), 3);
    }

    #[test]
    fn test_finds_compose_files_in_root_order() {
        let fs = MockFileSystem::new();
        fs.add_file("/srv/app/docker-compose.yml", "services: {}\n");
        fs.add_file("/opt/stack/compose.yaml", "services: {}\n");
        fs.add_file("/opt/stack/README.md", "");
        fs.add_file("/home/me/site/docker-compose.yaml", "services: {}\n");

        assert_eq!(
            discover_compose_files(&fs, &roots(), 5),
            vec![
                PathBuf::from("/opt/stack/compose.yaml"),
                PathBuf::from("/srv/app/docker-compose.yml"),
                PathBuf::from("/home/me/site/docker-compose.yaml"),
            ]
        );
    }

    #[test]
    fn test_depth_bound() {
        let fs = MockFileSystem::new();
        fs.add_file("/home/a/b/c/docker-compose.yml", "");
        fs.add_file("/home/a/b/c/d/docker-compose.yml", "");
        fs.add_file("/home/a/b/c/d/e/docker-compose.yml", "");

        assert_eq!(
            discover_compose_files(&fs, &roots(), 5),
            vec![PathBuf::from("/home/a/b/c/docker-compose.yml")]
        );
    }

    #[test]
    fn test_unreadable_directory_skipped() {
        let fs = MockFileSystem::new();
        fs.add_unreadable_dir("/home/locked");
        fs.add_file("/home/open/docker-compose.yml", "");

        assert_eq!(
            discover_compose_files(&fs, &roots(), 5),
            vec![PathBuf::from("/home/open/docker-compose.yml")]
        );
    }

    #[test]
    fn test_missing_roots() {
        let fs = MockFileSystem::new();
        assert!(discover_compose_files(&fs, &roots(), 5).is_empty());
    }
}
