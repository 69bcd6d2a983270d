//! Filename parsing and rendering
//!
//! A [`FilenameCodec`] matches recorder-generated base names against one of
//! two historical grammars, decodes the captured fields into a
//! [`ParsedCallRecord`], and renders a record back into the human-readable
//! target name. Non-matching files are not errors; they are simply not call
//! recordings.

use chrono::{Days, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::{RenamerError, Result};
use crate::models::{Direction, ParsedCallRecord, PhoneField, RawFilenameRecord};

/// Extensions (lowercase compare) that are even considered for parsing
const EXTENSIONS: &[&str] = &["mp4", "m4a", "3gp", "amr"];

/// Rendered datetime format, minute precision
const DATETIME_FORMAT: &str = "%Y.%m.%d-%H.%M";

/// The two historical filename grammars produced by the recorder.
///
/// `Modern` (epoch-millis) is the current encoding; `Legacy` (fixed-width
/// timestamp) is kept for directories recorded by older versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecVariant {
    /// `<phone>_<direction>_<epoch-millis>`
    #[default]
    Modern,
    /// `<direction>d<YYYYMMDDHHMMSS>p<phone>`
    Legacy,
}

/// Stateless parse/render operations over recorder filenames
#[derive(Debug)]
pub struct FilenameCodec {
    variant: CodecVariant,
    pattern: Regex,
}

impl FilenameCodec {
    /// Create a codec for the given grammar variant.
    pub fn new(variant: CodecVariant) -> Result<Self> {
        // Direction is captured as any digit so an out-of-range code is a
        // field error with context, not a silent structural mismatch.
        let pattern = match variant {
            CodecVariant::Modern => r"^(?P<phone>\+?\d+|null)_(?P<direction>\d)_(?P<timestamp>\d+)$",
            CodecVariant::Legacy => r"^(?P<direction>\d)d(?P<timestamp>\d{14})p(?P<phone>\+?\d+|null)$",
        };
        let pattern = Regex::new(pattern).map_err(|e| RenamerError::Other(e.to_string()))?;

        Ok(Self { variant, pattern })
    }

    /// Structurally parse a full filename.
    ///
    /// Returns `None` when the extension is not in the recording allow-list
    /// or the base name does not match the grammar — the file is not a call
    /// recording and is skipped without a diagnostic.
    #[must_use]
    pub fn parse(&self, filename: &str) -> Option<RawFilenameRecord> {
        let (base_name, extension) = filename.rsplit_once('.')?;
        if !EXTENSIONS.contains(&extension.to_lowercase().as_str()) {
            return None;
        }

        let caps = self.pattern.captures(base_name)?;
        let direction_code = caps["direction"].chars().next()?;

        Some(RawFilenameRecord {
            direction_code,
            timestamp_raw: caps["timestamp"].to_string(),
            phone_token: caps["phone"].to_string(),
            base_name: base_name.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Decode the structural fields of a record into a typed call record,
    /// with the phone field already normalized by the caller.
    pub fn decode(&self, raw: &RawFilenameRecord, phone: PhoneField) -> Result<ParsedCallRecord> {
        let direction =
            Direction::from_code(raw.direction_code).ok_or(RenamerError::BadDirectionCode {
                code: raw.direction_code,
                filename: raw.base_name.clone(),
            })?;

        let occurred_at = match self.variant {
            CodecVariant::Modern => decode_epoch_millis(&raw.timestamp_raw, &raw.base_name)?,
            CodecVariant::Legacy => decode_fixed_width(&raw.timestamp_raw, &raw.base_name)?,
        };

        Ok(ParsedCallRecord {
            direction,
            occurred_at,
            phone,
            original_base_name: raw.base_name.clone(),
            extension: raw.extension.clone(),
        })
    }

    /// Render a decoded record (and an optional resolved contact name) into
    /// the target base name. The extension is appended by the caller.
    #[must_use]
    pub fn render(&self, record: &ParsedCallRecord, contact_name: Option<&str>) -> String {
        let mut name = format!(
            "{} {} {}",
            record.direction.label(),
            record.occurred_at.format(DATETIME_FORMAT),
            record.phone.display(),
        );
        if let Some(contact) = contact_name {
            name.push(' ');
            name.push_str(contact);
        }
        name
    }
}

/// Decode an epoch-milliseconds timestamp into local wall-clock time.
fn decode_epoch_millis(raw: &str, filename: &str) -> Result<NaiveDateTime> {
    let millis: i64 = raw.parse().map_err(|_| RenamerError::BadTimestamp {
        raw: raw.to_string(),
        filename: filename.to_string(),
        reason: "epoch milliseconds out of range".to_string(),
    })?;

    let utc = chrono::DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        RenamerError::BadTimestamp {
            raw: raw.to_string(),
            filename: filename.to_string(),
            reason: "epoch milliseconds out of range".to_string(),
        }
    })?;

    Ok(utc.with_timezone(&chrono::Local).naive_local())
}

/// Decode a `YYYYMMDDHHMMSS` timestamp.
///
/// The recorder emits hour 24 for midnight at the end of a day; that is
/// corrected to hour 0 of the following day instead of being rejected.
fn decode_fixed_width(raw: &str, filename: &str) -> Result<NaiveDateTime> {
    let field = |range: std::ops::Range<usize>| -> Result<u32> {
        raw.get(range.clone())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| RenamerError::BadTimestamp {
                raw: raw.to_string(),
                filename: filename.to_string(),
                reason: "timestamp must be 14 digits".to_string(),
            })
    };

    let year = field(0..4)?;
    let month = field(4..6)?;
    let day = field(6..8)?;
    let mut hour = field(8..10)?;
    let minute = field(10..12)?;
    let second = field(12..14)?;

    let hour_rollover = hour == 24;
    if hour_rollover {
        hour = 0;
    }

    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|d| if hour_rollover { d.checked_add_days(Days::new(1)) } else { Some(d) })
        .ok_or_else(|| RenamerError::BadTimestamp {
            raw: raw.to_string(),
            filename: filename.to_string(),
            reason: "invalid calendar date".to_string(),
        })?;

    date.and_hms_opt(hour, minute, second)
        .ok_or_else(|| RenamerError::BadTimestamp {
            raw: raw.to_string(),
            filename: filename.to_string(),
            reason: "invalid time of day".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy() -> FilenameCodec {
        FilenameCodec::new(CodecVariant::Legacy).expect("pattern compiles")
    }

    fn modern() -> FilenameCodec {
        FilenameCodec::new(CodecVariant::Modern).expect("pattern compiles")
    }

    #[test]
    fn legacy_grammar_captures_all_fields() {
        let raw = legacy().parse("0d20230101120000p+36201234567.mp4").expect("matches");
        assert_eq!(raw.direction_code, '0');
        assert_eq!(raw.timestamp_raw, "20230101120000");
        assert_eq!(raw.phone_token, "+36201234567");
        assert_eq!(raw.extension, "mp4");
    }

    #[test]
    fn modern_grammar_captures_all_fields() {
        let raw = modern().parse("null_1_1672574400000.m4a").expect("matches");
        assert_eq!(raw.direction_code, '1');
        assert_eq!(raw.timestamp_raw, "1672574400000");
        assert_eq!(raw.phone_token, "null");
    }

    #[test]
    fn unsupported_extension_is_not_a_match() {
        assert!(legacy().parse("0d20230101120000pnull.txt").is_none());
        assert!(legacy().parse("0d20230101120000pnull").is_none());
    }

    #[test]
    fn unrelated_base_name_is_not_a_match() {
        assert!(legacy().parse("holiday-video.mp4").is_none());
        assert!(modern().parse("0d20230101120000pnull.mp4").is_none());
    }

    #[test]
    fn extension_compare_is_case_insensitive() {
        assert!(legacy().parse("0d20230101120000pnull.MP4").is_some());
    }

    #[test]
    fn direction_code_out_of_range_is_a_field_error() {
        let codec = legacy();
        let raw = codec.parse("2d20230101120000pnull.mp4").expect("structurally valid");
        let err = codec.decode(&raw, PhoneField::Null).expect_err("bad code");
        assert!(matches!(err, RenamerError::BadDirectionCode { code: '2', .. }));
    }

    #[test]
    fn hour_24_rolls_over_to_next_day() {
        let codec = legacy();
        let raw = codec.parse("0d20230615240000pnull.mp4").expect("matches");
        let record = codec.decode(&raw, PhoneField::Null).expect("decodes");
        assert_eq!(
            record.occurred_at,
            NaiveDate::from_ymd_opt(2023, 6, 16)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("valid date")
        );
    }

    #[test]
    fn bad_month_is_a_field_error() {
        let codec = legacy();
        let raw = codec.parse("0d20231301120000pnull.mp4").expect("structurally valid");
        let err = codec.decode(&raw, PhoneField::Null).expect_err("month 13");
        assert!(matches!(err, RenamerError::BadTimestamp { .. }));
    }

    #[test]
    fn render_round_trips_literal_fields() {
        let codec = legacy();
        let raw = codec.parse("1d20230101120000p+36201234567.mp4").expect("matches");
        let record = codec
            .decode(&raw, PhoneField::Raw("+36201234567".to_string()))
            .expect("decodes");
        assert_eq!(
            codec.render(&record, None),
            "Outgoing 2023.01.01-12.00 +36201234567"
        );
    }

    #[test]
    fn render_null_phone_without_contact() {
        let codec = legacy();
        let raw = codec.parse("0d20230101120000pnull.mp4").expect("matches");
        let record = codec.decode(&raw, PhoneField::Null).expect("decodes");
        assert_eq!(codec.render(&record, None), "Incoming 2023.01.01-12.00 null");
    }

    #[test]
    fn render_appends_resolved_contact() {
        let codec = legacy();
        let raw = codec.parse("1d20230101120000p+36201234567.mp4").expect("matches");
        let phone = PhoneField::Structured {
            country: "+36".to_string(),
            region: "20".to_string(),
            digits: "123-4567".to_string(),
        };
        let record = codec.decode(&raw, phone).expect("decodes");
        assert_eq!(
            codec.render(&record, Some("Alice")),
            "Outgoing 2023.01.01-12.00 +36(20)123-4567 Alice"
        );
    }
}
