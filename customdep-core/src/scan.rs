//! Parallel fact-file discovery with early directory pruning.
//!
//! - Excluded directories are skipped via `WalkDir::filter_entry`
//! - Remaining entries are filtered in parallel via Rayon's `par_bridge`

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::facts::is_fact_file;

/// Directories to exclude by default.
const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", ".gradle", ".idea"];

#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Gathers all `*.facts.json` files below `root`.
///
/// `root` may also be a single fact file. The result is sorted so that
/// reports are deterministic.
pub fn gather_fact_files(root: &Path, excludes: &[&str]) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(if is_fact_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let all_excludes: HashSet<&str> = EXCLUDED_DIRS
        .iter()
        .copied()
        .chain(excludes.iter().copied())
        .collect();

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &all_excludes))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if e.file_type().is_file() && is_fact_file(path) {
                    Some(Ok(path.to_path_buf()))
                } else {
                    None
                }
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Failed to gather fact files from {}", root.display()))?;

    files.sort();
    Ok(files)
}
