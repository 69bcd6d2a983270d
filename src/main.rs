//! Command-line entry point for the call-recording renamer.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use callrec_renamer::codec::{CodecVariant, FilenameCodec};
use callrec_renamer::config::AppConfig;
use callrec_renamer::contacts::ContactStore;
use callrec_renamer::logging::{init_logging, OperationTimer};
use callrec_renamer::phone::PhoneNumberNormalizer;
use callrec_renamer::pipeline::RenamePipeline;
use callrec_renamer::validation::InputValidator;

/// Automatic rename tool for files of a call recorder
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the recording files
    path: PathBuf,

    /// Contacts file path (defaults to the configured location)
    #[arg(short, long)]
    contacts: Option<PathBuf>,

    /// Treat a missing contacts-file directory as a startup error
    #[arg(long)]
    strict_contacts: bool,

    /// Print intended changes without touching the filesystem
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Continue past filename field errors instead of aborting the run
    #[arg(short, long)]
    skip_errors: bool,

    /// Default phone region for numbers without a country code (e.g. HU)
    #[arg(short, long)]
    region: Option<String>,

    /// Parse the legacy fixed-width filename grammar instead of the
    /// epoch-milliseconds one
    #[arg(long)]
    legacy: bool,
}

fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    let _log_guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(std::path::Path::new),
    )?;

    info!("Starting callrec-renamer");

    // Parse command line arguments
    let cli = Cli::parse();

    // Startup-time validation: nothing is touched past a bad input
    InputValidator::validate_target_directory(&cli.path)?;

    let contacts_path = cli.contacts.clone().unwrap_or_else(|| config.get_contacts_path());
    InputValidator::validate_contacts_path(&contacts_path, cli.strict_contacts)?;

    let region_code = cli.region.as_deref().unwrap_or(&config.rename.default_region);
    let region = InputValidator::parse_region(region_code)?;

    let variant = if cli.legacy { CodecVariant::Legacy } else { CodecVariant::Modern };

    if cli.dry_run {
        warn!("dry-run mode: no files will be renamed");
    }

    let codec = FilenameCodec::new(variant).context("Failed to build filename codec")?;
    let normalizer =
        PhoneNumberNormalizer::new(region).context("Failed to build phone normalizer")?;
    let contacts = ContactStore::load(&contacts_path)
        .with_context(|| format!("Failed to load contacts from {}", contacts_path.display()))?;

    let mut pipeline = RenamePipeline::new(
        cli.path.clone(),
        codec,
        normalizer,
        contacts,
        cli.dry_run,
        cli.skip_errors,
    );

    let timer = OperationTimer::new("rename_run");
    let summary = pipeline
        .run()
        .with_context(|| format!("Rename run failed in {}", cli.path.display()))?;
    timer.finish();

    if summary.contact_missing > 0 {
        warn!(
            count = summary.contact_missing,
            contacts_file = %contacts_path.display(),
            "some numbers have no contact yet; add names to the unknown section and re-run"
        );
    }

    Ok(())
}
