// WHY: Multi-file scanning lives in the library so the binary, the integration
// tests and the benchmarks drive the same pipeline

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::discovery::FileValidation;
use crate::reader::{FileReader, ReaderConfig};
use crate::scanner::{RuleMatch, Scanner};

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileStats {
    /// File path as given or discovered
    pub path: String,
    /// Number of characters scanned
    pub chars_processed: u64,
    /// Number of matches over all enabled rules
    pub matches_found: u64,
    /// Read plus scan time in milliseconds
    pub processing_time_ms: u64,
    /// Scan time in milliseconds (subset of processing_time_ms)
    pub scan_time_ms: u64,
    /// Throughput in characters per second
    pub chars_per_sec: f64,
    /// Processing status (success, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl FileStats {
    fn failed(path: String, error: String, elapsed_ms: u64) -> Self {
        Self {
            path,
            chars_processed: 0,
            matches_found: 0,
            processing_time_ms: elapsed_ms,
            scan_time_ms: 0,
            chars_per_sec: 0.0,
            status: "failed".to_string(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate statistics for one run
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunStats {
    /// Run start as seconds since the Unix epoch
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub total_chars_processed: u64,
    pub total_matches_found: u64,
    pub overall_chars_per_sec: f64,
    pub files_processed: u64,
    pub files_failed: u64,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    fn new(run_start: u64, elapsed_ms: u64, file_stats: Vec<FileStats>) -> Self {
        let total_chars_processed = file_stats.iter().map(|s| s.chars_processed).sum();
        let total_matches_found = file_stats.iter().map(|s| s.matches_found).sum();
        let files_failed = file_stats.iter().filter(|s| !s.is_success()).count() as u64;
        Self {
            run_start,
            total_processing_time_ms: elapsed_ms,
            total_chars_processed,
            total_matches_found,
            overall_chars_per_sec: chars_per_sec(total_chars_processed, elapsed_ms),
            files_processed: file_stats.len() as u64 - files_failed,
            files_failed,
            file_stats,
        }
    }
}

fn chars_per_sec(chars: u64, elapsed_ms: u64) -> f64 {
    if elapsed_ms > 0 {
        chars as f64 / (elapsed_ms as f64 / 1000.0)
    } else {
        chars as f64 * 1000.0
    }
}

/// Matches and statistics for one scanned file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub stats: FileStats,
    pub matches: Vec<RuleMatch>,
}

/// One JSON-lines record: a match plus the file it was found in
#[derive(Serialize)]
struct ReportLine<'a> {
    path: &'a str,
    #[serde(flatten)]
    found: &'a RuleMatch,
}

/// Options for a multi-file run
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub reader: ReaderConfig,
    /// Files scanned concurrently
    pub jobs: usize,
    pub fail_fast: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            reader: ReaderConfig::default(),
            jobs: num_cpus::get(),
            fail_fast: false,
        }
    }
}

/// Read and scan one target. Per-file problems end up in the stats unless
/// `fail_fast` is set.
pub async fn scan_file(scanner: Arc<Scanner>, reader: &FileReader, target: FileValidation, fail_fast: bool) -> Result<FileReport> {
    let start = Instant::now();
    let path = target.path.display().to_string();

    if let Some(error) = target.error {
        return Ok(FileReport {
            stats: FileStats::failed(path, error, 0),
            matches: Vec::new(),
        });
    }

    let (loaded, read_stats) = reader.load(&target.path).await?;
    let Some(loaded) = loaded else {
        let error = read_stats.read_error.unwrap_or_default();
        return Ok(FileReport {
            stats: FileStats::failed(path, error, start.elapsed().as_millis() as u64),
            matches: Vec::new(),
        });
    };

    // WHY: scanning is CPU-bound; keep it off the async worker threads
    let scanned = tokio::task::spawn_blocking(move || -> Result<(u64, Vec<RuleMatch>, u64)> {
        let scan_start = Instant::now();
        let text = loaded.text()?;
        let matches = scanner.scan(text);
        Ok((text.chars().count() as u64, matches, scan_start.elapsed().as_millis() as u64))
    })
    .await
    .context("Scan task failed")?;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    match scanned {
        Ok((chars, matches, scan_time_ms)) => {
            debug!("Scanned {}: {} chars, {} matches", path, chars, matches.len());
            Ok(FileReport {
                stats: FileStats {
                    path,
                    chars_processed: chars,
                    matches_found: matches.len() as u64,
                    processing_time_ms: elapsed_ms,
                    scan_time_ms,
                    chars_per_sec: chars_per_sec(chars, elapsed_ms),
                    status: "success".to_string(),
                    error: None,
                },
                matches,
            })
        }
        Err(e) => {
            let error = format!("{:#}", e);
            warn!("Failed to scan {}: {}", path, error);
            if fail_fast {
                return Err(e.context(format!("Failed to scan {}", path)));
            }
            Ok(FileReport {
                stats: FileStats::failed(path, error, elapsed_ms),
                matches: Vec::new(),
            })
        }
    }
}

/// Scan every target with at most `config.jobs` files in flight.
///
/// `on_report` sees each file's report in input order. With `fail_fast` the
/// first failed file aborts the run.
pub async fn process_files<F>(
    targets: Vec<FileValidation>,
    scanner: Arc<Scanner>,
    config: &ProcessingConfig,
    mut on_report: F,
) -> Result<RunStats>
where
    F: FnMut(&FileReport) -> Result<()>,
{
    let run_start = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    let start = Instant::now();
    let reader = FileReader::new(config.reader.clone());
    let fail_fast = config.fail_fast;

    info!("Scanning {} files with {} jobs", targets.len(), config.jobs);

    let mut reports = stream::iter(targets)
        .map(|target| scan_file(Arc::clone(&scanner), &reader, target, fail_fast))
        .buffered(config.jobs.max(1));

    let mut file_stats = Vec::new();
    while let Some(report) = reports.next().await {
        let report = report?;
        if fail_fast {
            if let Some(error) = &report.stats.error {
                anyhow::bail!("Failed to process {}: {}", report.stats.path, error);
            }
        }
        on_report(&report)?;
        file_stats.push(report.stats);
    }

    let stats = RunStats::new(run_start, start.elapsed().as_millis() as u64, file_stats);
    info!(
        "Run completed: {} processed, {} failed, {} matches",
        stats.files_processed, stats.files_failed, stats.total_matches_found
    );
    Ok(stats)
}

/// Write a report's matches as JSON lines
pub fn write_matches<W: Write>(writer: &mut W, report: &FileReport) -> Result<()> {
    for found in &report.matches {
        let line = ReportLine {
            path: &report.stats.path,
            found,
        };
        serde_json::to_writer(&mut *writer, &line)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Write run statistics as pretty JSON
pub async fn write_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write stats to {}", path.display()))
}
