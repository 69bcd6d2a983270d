//! Data models for call-recording filenames
//!
//! This module contains the data structures shared across the parsing,
//! normalization, and renaming stages.

use chrono::NaiveDateTime;

/// Call direction, decoded from the single-digit code in the filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A received call (code `0`)
    Incoming,
    /// A placed call (code `1`)
    Outgoing,
}

impl Direction {
    /// Map a direction code character to a direction.
    ///
    /// Returns `None` for anything other than `0` or `1`; the caller turns
    /// that into a field parse error with filename context.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Self::Incoming),
            '1' => Some(Self::Outgoing),
            _ => None,
        }
    }

    /// Human-readable label used in the rendered filename
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Incoming => "Incoming",
            Self::Outgoing => "Outgoing",
        }
    }
}

/// A phone field after normalization.
///
/// Every non-null token maps to exactly one variant; normalization degrades
/// to `Raw` on failure instead of discarding the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneField {
    /// A successfully parsed, internationally-formatted number
    Structured {
        /// Country calling code with leading `+`, e.g. `+36`
        country: String,
        /// Region/area code, e.g. `20`
        region: String,
        /// Remaining digit groups joined with `-`, e.g. `123-4567`
        digits: String,
    },
    /// Token that could not (or should not) be parsed as a full number
    Raw(String),
    /// Explicit absence, encoded as the literal `null` in filenames
    Null,
}

impl PhoneField {
    /// Canonical lookup key for the contact store.
    ///
    /// Only structured numbers have one: country + region + digits with the
    /// group separators stripped, which is the E.164 form of the number.
    #[must_use]
    pub fn canonical(&self) -> Option<String> {
        match self {
            Self::Structured { country, region, digits } => {
                Some(format!("{country}{region}{}", digits.replace('-', "")))
            }
            Self::Raw(_) | Self::Null => None,
        }
    }

    /// Display form used in the rendered filename
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Structured { country, region, digits } => {
                format!("{country}({region}){digits}")
            }
            Self::Raw(text) => text.clone(),
            Self::Null => "null".to_string(),
        }
    }
}

/// Structural fields captured from a filename before any semantic decoding
#[derive(Debug, Clone)]
pub struct RawFilenameRecord {
    /// Direction code character as it appears in the filename
    pub direction_code: char,
    /// Timestamp field, either 14 fixed-width digits or epoch milliseconds
    pub timestamp_raw: String,
    /// Phone token: digits with optional leading `+`, or the literal `null`
    pub phone_token: String,
    /// Base name (extension stripped) the record was parsed from
    pub base_name: String,
    /// File extension without the dot, original case
    pub extension: String,
}

/// A fully decoded call record, ready for rendering
#[derive(Debug, Clone)]
pub struct ParsedCallRecord {
    /// Call direction
    pub direction: Direction,
    /// Local wall-clock time of the call, second precision
    pub occurred_at: NaiveDateTime,
    /// Normalized phone field
    pub phone: PhoneField,
    /// Base name the record was parsed from
    pub original_base_name: String,
    /// File extension without the dot
    pub extension: String,
}

/// Terminal state of one directory entry after a pipeline pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Not a call recording; silently dropped
    Unmatched,
    /// Structural match but a field failed to decode; reported
    ParseFailed,
    /// Number has no known contact; file left untouched, number recorded
    ContactMissing,
    /// Renamed (or would be, in dry-run mode)
    Renamed {
        /// Full filename before the rename
        old_name: String,
        /// Full filename after the rename
        new_name: String,
    },
}

/// Counts of per-file outcomes for one run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Entries that did not match the filename grammar
    pub unmatched: usize,
    /// Entries skipped because a field failed to decode
    pub parse_failed: usize,
    /// Entries skipped because the contact was unknown
    pub contact_missing: usize,
    /// Entries renamed (or printed, in dry-run mode)
    pub renamed: usize,
}

impl RunSummary {
    /// Record one outcome
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Unmatched => self.unmatched += 1,
            FileOutcome::ParseFailed => self.parse_failed += 1,
            FileOutcome::ContactMissing => self.contact_missing += 1,
            FileOutcome::Renamed { .. } => self.renamed += 1,
        }
    }
}
