//! Rename pipeline orchestration
//!
//! Walks one directory, and for each entry: structural parse → phone
//! normalization → contact resolution → render → rename + modification-time
//! fix-up. Files are processed sequentially and independently; one file's
//! failure never blocks another file. Progress (`old => new`) goes to
//! stdout, diagnostics to the tracing stream on stderr.

use chrono::{Local, TimeZone};
use filetime::FileTime;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::codec::FilenameCodec;
use crate::contacts::ContactStore;
use crate::error::{RenamerError, Result};
use crate::models::{FileOutcome, ParsedCallRecord, RunSummary};
use crate::phone::PhoneNumberNormalizer;

/// Fixed correction added to the decoded call time before it is written as
/// the file's modification time, compensating for the recorder's timestamp
/// convention.
const MTIME_OFFSET_SECS: i64 = 3600;

/// Sequential, single-pass rename pipeline over one directory
pub struct RenamePipeline {
    directory: PathBuf,
    codec: FilenameCodec,
    normalizer: PhoneNumberNormalizer,
    contacts: ContactStore,
    dry_run: bool,
    skip_errors: bool,
}

impl RenamePipeline {
    /// Assemble a pipeline over `directory` from its collaborators.
    pub fn new(
        directory: PathBuf,
        codec: FilenameCodec,
        normalizer: PhoneNumberNormalizer,
        contacts: ContactStore,
        dry_run: bool,
        skip_errors: bool,
    ) -> Self {
        Self {
            directory,
            codec,
            normalizer,
            contacts,
            dry_run,
            skip_errors,
        }
    }

    /// Process every entry in the directory once, then persist the contact
    /// database. The database is saved even in dry-run mode so a dry run
    /// still discovers and records unknown numbers.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut filenames: Vec<String> = std::fs::read_dir(&self.directory)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        filenames.sort();

        debug!(directory = %self.directory.display(), entries = filenames.len(), "scanning directory");

        let mut summary = RunSummary::default();
        for filename in &filenames {
            match self.process_entry(filename) {
                Ok(outcome) => summary.record(&outcome),
                Err(err) => {
                    summary.record(&FileOutcome::ParseFailed);
                    error!(file = filename, error = %err, "failed to decode recording filename");
                    if !self.skip_errors {
                        return Err(err);
                    }
                }
            }
        }

        if self.contacts.is_dirty() {
            info!("persisting newly discovered unknown numbers");
        }
        self.contacts.save()?;

        info!(
            renamed = summary.renamed,
            contact_missing = summary.contact_missing,
            parse_failed = summary.parse_failed,
            unmatched = summary.unmatched,
            "run complete"
        );
        Ok(summary)
    }

    /// Visit one directory entry; each terminal state maps to a [`FileOutcome`].
    fn process_entry(&mut self, filename: &str) -> Result<FileOutcome> {
        let Some(raw) = self.codec.parse(filename) else {
            return Ok(FileOutcome::Unmatched);
        };

        let phone = self.normalizer.normalize(&raw.phone_token);
        let record = self.codec.decode(&raw, phone)?;

        let contact_name = match record.phone.canonical() {
            Some(canonical) => match self.contacts.resolve(&canonical) {
                Some(name) => Some(name),
                None => {
                    warn!(
                        file = filename,
                        number = canonical,
                        "no contact for number, leaving file untouched"
                    );
                    return Ok(FileOutcome::ContactMissing);
                }
            },
            // Raw and null phones render without a contact name.
            None => None,
        };

        let new_name = format!(
            "{}.{}",
            self.codec.render(&record, contact_name.as_deref()),
            record.extension
        );

        println!("{filename}\t=>\t{new_name}");

        if !self.dry_run {
            self.apply(filename, &new_name, &record)?;
        }

        Ok(FileOutcome::Renamed {
            old_name: filename.to_string(),
            new_name,
        })
    }

    /// Rename the file on disk and fix its modification time to the decoded
    /// call time plus the fixed offset.
    fn apply(&self, old_name: &str, new_name: &str, record: &ParsedCallRecord) -> Result<()> {
        let old_path = self.directory.join(old_name);
        let new_path = self.directory.join(new_name);
        std::fs::rename(&old_path, &new_path)?;

        let occurred_local = Local
            .from_local_datetime(&record.occurred_at)
            .earliest()
            .ok_or_else(|| {
                RenamerError::Other(format!(
                    "call time {} does not exist in the local timezone",
                    record.occurred_at
                ))
            })?;
        let mtime = FileTime::from_unix_time(occurred_local.timestamp() + MTIME_OFFSET_SECS, 0);
        filetime::set_file_mtime(&new_path, mtime)?;

        Ok(())
    }

    /// Read-only view of the contact store, for reporting and tests
    #[must_use]
    pub const fn contacts(&self) -> &ContactStore {
        &self.contacts
    }
}
