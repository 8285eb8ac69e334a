use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Path argument that stands for standard input
pub const STDIN_PATH: &str = "-";

/// Configuration for file discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Descend into hidden directories and scan hidden files
    pub include_hidden: bool,
    /// Follow symbolic links while walking directories
    pub follow_links: bool,
}

/// Result of file discovery validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

impl FileValidation {
    fn ok(path: PathBuf) -> Self {
        Self { path, error: None }
    }

    /// True for the `-` target
    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    // The walk root itself is never skipped, even when named ".something".
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

/// Expand one CLI argument: a file stays as is, a directory becomes its regular
/// files in sorted order. Problems become per-path errors unless `fail_fast`.
pub fn expand_path(path: &Path, config: &DiscoveryConfig) -> Result<Vec<FileValidation>> {
    if path.as_os_str() == STDIN_PATH {
        return Ok(vec![FileValidation::ok(path.to_path_buf())]);
    }

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            let error = format!("Cannot access {}: {}", path.display(), e);
            warn!("{}", error);
            if config.fail_fast {
                return Err(e).with_context(|| format!("Cannot access {}", path.display()));
            }
            return Ok(vec![FileValidation {
                path: path.to_path_buf(),
                error: Some(error),
            }]);
        }
    };

    if metadata.is_file() {
        return Ok(vec![FileValidation::ok(path.to_path_buf())]);
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(path)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| config.include_hidden || !is_hidden(entry));

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                debug!("Found file: {}", entry.path().display());
                files.push(FileValidation::ok(entry.into_path()));
            }
            Ok(_) => {}
            Err(e) => {
                let error_path = e.path().map_or_else(|| path.to_path_buf(), Path::to_path_buf);
                let error = format!("Walk error under {}: {}", path.display(), e);
                warn!("{}", error);
                if config.fail_fast {
                    return Err(anyhow::Error::new(e).context(error));
                }
                files.push(FileValidation {
                    path: error_path,
                    error: Some(error),
                });
            }
        }
    }

    Ok(files)
}

/// Expand every CLI path, keeping argument order, on the blocking pool.
/// WHY: walkdir is synchronous; large trees must not stall the runtime
pub async fn discover_files(paths: Vec<PathBuf>, config: DiscoveryConfig) -> Result<Vec<FileValidation>> {
    let start = std::time::Instant::now();

    let files = tokio::task::spawn_blocking(move || -> Result<Vec<FileValidation>> {
        let mut files = Vec::new();
        for path in &paths {
            files.extend(expand_path(path, &config)?);
        }
        Ok(files)
    })
    .await
    .context("Discovery task failed")??;

    let invalid_count = files.iter().filter(|f| f.error.is_some()).count();
    if invalid_count > 0 {
        warn!("Found {} paths with discovery issues", invalid_count);
    }
    info!(
        "Discovery completed in {:.2}ms: {} valid, {} invalid",
        start.elapsed().as_secs_f64() * 1000.0,
        files.len() - invalid_count,
        invalid_count
    );

    Ok(files)
}
