use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// First candidate that exists, in the order given
pub fn first_existing<P: AsRef<Path>>(fs: &dyn FileSystem, candidates: &[P]) -> Option<PathBuf> {
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if fs.exists(candidate) {
            info!(path = %candidate.display(), "Found configuration file");
            return Some(candidate.to_path_buf());
        }
        debug!(path = %candidate.display(), "Candidate path does not exist");
    }

    info!("Configuration file not found");
    None
}
