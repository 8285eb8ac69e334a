use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

use dsrules::discovery::{self, DiscoveryConfig};
use dsrules::processing::{self, ProcessingConfig};
use dsrules::reader::ReaderConfig;
use dsrules::{RuleKind, ScanConfig, Scanner};

#[derive(Parser, Debug)]
#[command(name = "dsrules")]
#[command(about = "Scan text for CPR numbers, names, addresses and health terms")]
#[command(version)]
struct Args {
    /// Files or directories to scan; `-` reads standard input
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Rules to run, comma separated
    #[arg(long, value_enum, value_delimiter = ',', default_value = "cpr")]
    rules: Vec<RuleKind>,

    /// Require CPR numbers to pass the modulus-11 check
    #[arg(long)]
    mod11: bool,

    /// Suppress CPR numbers glued to other text or preceded by a known label
    #[arg(long)]
    examine_context: bool,

    /// Also report lone last names
    #[arg(long)]
    expansive_names: bool,

    /// Use memory-mapped I/O instead of async buffered
    #[arg(long)]
    use_mmap: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Files scanned concurrently
    #[arg(long, default_value_t = num_cpus::get())]
    jobs: usize,

    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: structured JSON logging on stderr; stdout carries the match stream
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting dsrules");
    info!(?args, "Parsed CLI arguments");

    if args.jobs == 0 {
        anyhow::bail!("--jobs must be at least 1");
    }

    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
        ..DiscoveryConfig::default()
    };
    let targets = discovery::discover_files(args.paths.clone(), discovery_config).await?;

    let scanner = Arc::new(Scanner::new(&ScanConfig {
        rules: args.rules.clone(),
        check_mod11: args.mod11,
        examine_context: args.examine_context,
        expansive_names: args.expansive_names,
    }));
    info!(rules = ?scanner.rule_names(), "Scanner ready");

    let config = ProcessingConfig {
        reader: ReaderConfig {
            fail_fast: args.fail_fast,
            use_mmap: args.use_mmap,
            ..ReaderConfig::default()
        },
        jobs: args.jobs,
        fail_fast: args.fail_fast,
    };

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(targets.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} files {msg}")?);
        bar
    };

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    let stats = processing::process_files(targets, scanner, &config, |report| {
        processing::write_matches(&mut out, report)?;
        progress.inc(1);
        Ok(())
    })
    .await?;
    out.flush()?;
    progress.finish_and_clear();

    if let Some(stats_path) = &args.stats_out {
        processing::write_stats(stats_path, &stats).await?;
        info!("Stats written to {}", stats_path.display());
    }

    info!(
        "Finished: {} files, {} failed, {} matches",
        stats.files_processed + stats.files_failed,
        stats.files_failed,
        stats.total_matches_found
    );
    Ok(())
}
