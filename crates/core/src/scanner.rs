use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub fn is_java_source(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("java")
}

/// Expand files and directories into the `.java` files they name.
///
/// Directories are walked with `.gitignore` rules applied. An explicitly
/// named file is kept only if it is a Java source. The result is sorted and
/// free of duplicates.
pub struct Scanner;

impl Scanner {
    pub fn collect_java_files(roots: &[PathBuf]) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = roots
            .iter()
            .flat_map(|root| Self::collect_paths(root))
            .collect();
        files.sort();
        files.dedup();
        files
    }

    fn collect_paths(root: &Path) -> Vec<PathBuf> {
        if root.is_file() {
            return if is_java_source(root) {
                vec![root.to_path_buf()]
            } else {
                tracing::debug!("skipping non-Java file {}", root.display());
                Vec::new()
            };
        }
        if !root.exists() {
            tracing::warn!("path does not exist: {}", root.display());
            return Vec::new();
        }

        WalkBuilder::new(root)
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => {
                    let path = entry.path();
                    (path.is_file() && is_java_source(path)).then(|| path.to_path_buf())
                }
                Err(e) => {
                    tracing::warn!("walk error under {}: {}", root.display(), e);
                    None
                }
            })
            .collect()
    }
}
