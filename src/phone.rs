//! Phone number normalization
//!
//! Turns the raw phone token captured from a filename into a [`PhoneField`].
//! Parsing is locale-aware via the `phonenumber` crate, seeded with a default
//! region for tokens that lack a country code. Failures never propagate: a
//! token that cannot be parsed degrades to [`PhoneField::Raw`] so the file is
//! still renamed with the number preserved verbatim.

use phonenumber::{country, Mode};
use regex::Regex;
use std::borrow::Cow;
use tracing::warn;

use crate::models::PhoneField;

/// Tokens shorter than this are never full numbers; library parsing is
/// skipped and the token kept raw.
const MIN_FULL_LENGTH: usize = 9;

/// National trunk prefix. Tokens starting with it are already in national
/// dialing form and parse against the default region.
const TRUNK_PREFIX: char = '0';

/// Parses raw numeric tokens into canonical structured phone fields
#[derive(Debug)]
pub struct PhoneNumberNormalizer {
    default_region: country::Id,
    international_pattern: Regex,
}

impl PhoneNumberNormalizer {
    /// Create a normalizer seeded with the default region used for numbers
    /// that carry no country code.
    pub fn new(default_region: country::Id) -> crate::error::Result<Self> {
        // International display form: "+CC REGION GROUP [GROUP ...]".
        // A single trailing group and multiple groups are both accepted;
        // the groups collapse into one hyphen-joined digits component.
        let international_pattern = Regex::new(r"^(?P<country>\+\d+) (?P<region>\d+) (?P<rest>\d+(?: \d+)*)$")
            .map_err(|e| crate::error::RenamerError::Other(e.to_string()))?;

        Ok(Self { default_region, international_pattern })
    }

    /// Normalize a raw phone token into a [`PhoneField`].
    ///
    /// The literal `null` maps to [`PhoneField::Null`]. Tokens too short to
    /// be full numbers map straight to [`PhoneField::Raw`]. Everything else
    /// goes through international parsing; on any failure the token falls
    /// back to `Raw` with a warning.
    #[must_use]
    pub fn normalize(&self, raw_token: &str) -> PhoneField {
        if raw_token == "null" {
            return PhoneField::Null;
        }

        if raw_token.len() < MIN_FULL_LENGTH {
            return PhoneField::Raw(raw_token.to_string());
        }

        // Force international interpretation for bare country-code-first
        // tokens like "36201234567"; "+..." and trunk-prefixed national
        // forms pass through unchanged.
        let candidate: Cow<'_, str> =
            if raw_token.starts_with('+') || raw_token.starts_with(TRUNK_PREFIX) {
                Cow::Borrowed(raw_token)
            } else {
                Cow::Owned(format!("+{raw_token}"))
            };

        let number = match phonenumber::parse(Some(self.default_region), candidate.as_ref()) {
            Ok(number) => number,
            Err(err) => {
                warn!(token = raw_token, error = %err, "phone number parse failed, keeping raw token");
                return PhoneField::Raw(raw_token.to_string());
            }
        };

        if !phonenumber::is_valid(&number) {
            warn!(token = raw_token, "token parsed but is not a valid number, keeping raw token");
            return PhoneField::Raw(raw_token.to_string());
        }

        let international = number.format().mode(Mode::International).to_string();

        match self.international_pattern.captures(&international) {
            Some(caps) => PhoneField::Structured {
                country: caps["country"].to_string(),
                region: caps["region"].to_string(),
                digits: caps["rest"].replace(' ', "-"),
            },
            None => {
                warn!(
                    token = raw_token,
                    formatted = %international,
                    "international format did not match the expected structure, keeping raw token"
                );
                PhoneField::Raw(raw_token.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> PhoneNumberNormalizer {
        PhoneNumberNormalizer::new(country::HU).expect("pattern compiles")
    }

    #[test]
    fn null_literal_maps_to_null() {
        assert_eq!(normalizer().normalize("null"), PhoneField::Null);
    }

    #[test]
    fn short_token_stays_raw_without_parsing() {
        assert_eq!(normalizer().normalize("123"), PhoneField::Raw("123".to_string()));
        assert_eq!(normalizer().normalize("12345678"), PhoneField::Raw("12345678".to_string()));
    }

    #[test]
    fn bare_country_code_token_equals_plus_prefixed_form() {
        let n = normalizer();
        let with_plus = n.normalize("+36201234567");
        let without_plus = n.normalize("36201234567");
        assert!(matches!(with_plus, PhoneField::Structured { .. }));
        assert_eq!(with_plus, without_plus);
    }

    #[test]
    fn hungarian_mobile_decomposes_into_country_region_digits() {
        match normalizer().normalize("+36201234567") {
            PhoneField::Structured { country, region, digits } => {
                assert_eq!(country, "+36");
                assert_eq!(region, "20");
                assert_eq!(digits, "123-4567");
            }
            other => panic!("expected structured number, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_token_falls_back_to_raw() {
        // Long enough to attempt parsing, but not a valid number anywhere
        assert_eq!(
            normalizer().normalize("+999999999999999"),
            PhoneField::Raw("+999999999999999".to_string())
        );
    }
}
