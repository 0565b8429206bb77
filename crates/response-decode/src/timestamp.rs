//! Timestamp fallback chain.
//!
//! API payloads carry timestamps in a handful of close-but-not-equal
//! formats. Parsing tries RFC 3339 first, then a fixed, ordered list of
//! fallback patterns; naive patterns are interpreted as UTC and a bare
//! date means midnight UTC. What happens when every pattern fails is the
//! caller's choice via [`DatePolicy`].

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized timestamp `{input}`")]
pub struct TimestampParseError {
    pub input: String,
}

/// Behavior when the whole fallback chain is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    /// Surface a [`TimestampParseError`] to the caller.
    Fail,
    /// Substitute the current wall-clock time. Matches the historical
    /// behavior of lenient API clients; corrupt timestamps pass through
    /// undetected, so prefer [`DatePolicy::Fail`] where callers can react.
    SubstituteNow,
    /// Substitute the Unix epoch, keeping the substitution detectable.
    SubstituteEpoch,
}

const NAIVE_MILLIS_Z: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);
const NAIVE_SECONDS_Z: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");
const OFFSET_MILLIS: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory][offset_minute]"
);
const OFFSET_SECONDS: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
);
const NAIVE_SECONDS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATE_ONLY: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

enum Fallback {
    /// Pattern carries its own numeric offset.
    Offset(&'static [BorrowedFormatItem<'static>]),
    /// Pattern has no offset; the value is taken as UTC.
    NaiveUtc(&'static [BorrowedFormatItem<'static>]),
    /// Calendar date only; midnight UTC.
    DateOnly(&'static [BorrowedFormatItem<'static>]),
}

/// Ordered fallback patterns tried after RFC 3339. Immutable by
/// construction; the order is part of the contract.
const FALLBACK_CHAIN: &[Fallback] = &[
    Fallback::NaiveUtc(NAIVE_MILLIS_Z),
    Fallback::NaiveUtc(NAIVE_SECONDS_Z),
    Fallback::Offset(OFFSET_MILLIS),
    Fallback::Offset(OFFSET_SECONDS),
    Fallback::NaiveUtc(NAIVE_SECONDS),
    Fallback::DateOnly(DATE_ONLY),
];

/// Parse a wire timestamp through the fallback chain, resolving
/// exhaustion according to `policy`.
pub fn parse_timestamp(
    input: &str,
    policy: DatePolicy,
) -> Result<OffsetDateTime, TimestampParseError> {
    if let Some(parsed) = try_parse(input) {
        return Ok(parsed);
    }
    match policy {
        DatePolicy::Fail => Err(TimestampParseError {
            input: input.to_string(),
        }),
        DatePolicy::SubstituteNow => Ok(OffsetDateTime::now_utc()),
        DatePolicy::SubstituteEpoch => Ok(OffsetDateTime::UNIX_EPOCH),
    }
}

fn try_parse(input: &str) -> Option<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(input, &Rfc3339) {
        return Some(parsed);
    }
    for pattern in FALLBACK_CHAIN {
        let parsed = match pattern {
            Fallback::Offset(format) => OffsetDateTime::parse(input, format).ok(),
            Fallback::NaiveUtc(format) => PrimitiveDateTime::parse(input, format)
                .ok()
                .map(PrimitiveDateTime::assume_utc),
            Fallback::DateOnly(format) => Date::parse(input, format)
                .ok()
                .map(|date| date.midnight().assume_utc()),
        };
        if parsed.is_some() {
            return parsed;
        }
    }
    None
}

/// Serde adapter preserving the historical lenient behavior: an
/// unrecognized timestamp becomes the current wall-clock time instead of
/// failing the surrounding decode.
pub mod flexible {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    use super::{parse_timestamp, DatePolicy};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw, DatePolicy::SubstituteNow).map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(timestamp: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::serialize_rfc3339(timestamp, serializer)
    }
}

/// Serde adapter that surfaces chain exhaustion as a deserialization
/// error, so corrupt timestamps fail the decode instead of passing
/// through as "now".
pub mod strict {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    use super::{parse_timestamp, DatePolicy};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw, DatePolicy::Fail).map_err(serde::de::Error::custom)
    }

    pub fn serialize<S>(timestamp: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::serialize_rfc3339(timestamp, serializer)
    }
}

fn serialize_rfc3339<S>(timestamp: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let text = timestamp
        .format(&Rfc3339)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn fallback_chain_matrix() {
        let noon = datetime!(2025-03-30 12:00:00 UTC);
        let cases = [
            "2025-03-30T12:00:00.000Z",
            "2025-03-30T12:00:00Z",
            "2025-03-30T12:00:00.000+0000",
            "2025-03-30T12:00:00+0000",
            "2025-03-30T12:00:00",
        ];
        for case in cases {
            assert_eq!(parse_timestamp(case, DatePolicy::Fail).unwrap(), noon, "{case}");
        }
        assert_eq!(
            parse_timestamp("2025-03-30", DatePolicy::Fail).unwrap(),
            datetime!(2025-03-30 00:00:00 UTC)
        );
    }

    #[test]
    fn offset_patterns_keep_their_offset() {
        let parsed = parse_timestamp("2025-03-30T12:00:00.000+0200", DatePolicy::Fail).unwrap();
        assert_eq!(parsed, datetime!(2025-03-30 10:00:00 UTC));
    }

    #[test]
    fn exhaustion_policies() {
        let err = parse_timestamp("not-a-date", DatePolicy::Fail).unwrap_err();
        assert_eq!(err.input, "not-a-date");

        assert_eq!(
            parse_timestamp("not-a-date", DatePolicy::SubstituteEpoch).unwrap(),
            OffsetDateTime::UNIX_EPOCH
        );

        let before = OffsetDateTime::now_utc();
        let substituted = parse_timestamp("not-a-date", DatePolicy::SubstituteNow).unwrap();
        let after = OffsetDateTime::now_utc();
        assert!(substituted >= before && substituted <= after);
    }
}
