//! Staleness rule for assets.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{ArchiverError, Result};
use crate::models::Asset;

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y%m%dT%H%M%S%.f%z"];
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y%m%dT%H%M%S%.f",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y%m%d"];

/// Parse an asset timestamp flexibly.
///
/// Accepts RFC 3339 plus the ISO-8601 extended and basic forms, with or
/// without an offset, and date-only values. Offset-less forms are taken as
/// UTC; a bare date is midnight UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(dt.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Some(midnight) = NaiveDate::parse_from_str(naive, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(midnight.and_utc());
        }
    }

    Err(ArchiverError::Parse(format!("invalid timestamp format: {s:?}")))
}

/// The asset's `updated` value as a UTC instant.
fn updated_at(asset: &Asset) -> Result<DateTime<Utc>> {
    match &asset.updated {
        Some(Value::String(s)) => parse_timestamp(s),
        None => Err(ArchiverError::Parse("missing updated timestamp".into())),
        Some(other) => Err(ArchiverError::Parse(format!(
            "updated is not a timestamp string: {other}"
        ))),
    }
}

/// Whole days elapsed between `updated` and `now`, truncated toward zero.
pub fn elapsed_days(updated: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - updated).num_days()
}

/// An asset is eligible when it is not archived yet and was last updated at
/// least `threshold_days` whole days before `now`.
///
/// Already-archived assets are never eligible, so their timestamp is not parsed.
pub fn is_archive_eligible(
    asset: &Asset,
    now: DateTime<Utc>,
    threshold_days: u32,
) -> Result<bool> {
    if asset.archived {
        return Ok(false);
    }

    let updated = updated_at(asset)?;
    Ok(elapsed_days(updated, now) >= i64::from(threshold_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn asset(updated: &str, archived: bool) -> Asset {
        Asset {
            id: "a-1".into(),
            updated: Some(Value::from(updated)),
            archived,
            tenant_id: None,
            extra: Map::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        parse_timestamp("2024-06-01T00:00:00Z").unwrap()
    }

    #[test]
    fn stale_asset_is_eligible() {
        assert!(is_archive_eligible(&asset("2024-05-01T00:00:00Z", false), now(), 30).unwrap());
    }

    #[test]
    fn archived_asset_is_not_eligible() {
        assert!(!is_archive_eligible(&asset("2024-05-01T00:00:00Z", true), now(), 30).unwrap());
    }

    #[test]
    fn partial_days_are_truncated() {
        let recent = asset("2024-05-02T12:00:00Z", false);
        let updated = updated_at(&recent).unwrap();
        assert_eq!(elapsed_days(updated, now()), 29);
        assert!(!is_archive_eligible(&recent, now(), 30).unwrap());
    }

    #[test]
    fn exact_threshold_is_eligible() {
        assert!(is_archive_eligible(&asset("2024-05-02T00:00:00Z", false), now(), 30).unwrap());
    }

    #[test]
    fn future_timestamp_is_not_eligible() {
        assert!(!is_archive_eligible(&asset("2024-07-01T00:00:00Z", false), now(), 0).unwrap());
    }

    #[test]
    fn offsets_are_respected() {
        // 2024-05-02T02:00:00+03:00 is 2024-05-01T23:00:00Z, 30 days and 1 hour ago.
        let shifted = asset("2024-05-02T02:00:00+03:00", false);
        assert!(is_archive_eligible(&shifted, now(), 30).unwrap());
    }

    #[test]
    fn naive_formats_are_utc() {
        let expected = parse_timestamp("2024-05-01T10:20:30Z").unwrap();
        assert_eq!(parse_timestamp("2024-05-01 10:20:30").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-01T10:20:30").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-05-01 10:20:30.500").unwrap(),
            parse_timestamp("2024-05-01T10:20:30.500Z").unwrap()
        );
    }

    #[test]
    fn unparseable_timestamp_is_an_error() {
        let err = is_archive_eligible(&asset("last tuesday", false), now(), 30).unwrap_err();
        assert!(matches!(err, ArchiverError::Parse(ref m) if m.contains("last tuesday")));
        assert!(is_archive_eligible(&asset("", false), now(), 30).is_err());
    }

    #[test]
    fn date_only_and_basic_forms_parse() {
        let midnight = parse_timestamp("2024-05-01T00:00:00Z").unwrap();
        assert_eq!(parse_timestamp("2024-05-01").unwrap(), midnight);
        assert_eq!(parse_timestamp("20240501").unwrap(), midnight);

        let expected = parse_timestamp("2024-05-01T10:20:30Z").unwrap();
        assert_eq!(parse_timestamp("20240501T102030").unwrap(), expected);
        assert_eq!(parse_timestamp("20240501T102030Z").unwrap(), expected);
        assert_eq!(parse_timestamp("20240501T132030+0300").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-01T13:20:30+0300").unwrap(), expected);

        assert!(is_archive_eligible(&asset("2024-05-01", false), now(), 31).unwrap());
        assert!(!is_archive_eligible(&asset("2024-05-01", false), now(), 32).unwrap());
    }

    #[test]
    fn null_or_numeric_updated_is_an_error() {
        let mut missing = asset("", false);
        missing.updated = None;
        let err = is_archive_eligible(&missing, now(), 30).unwrap_err();
        assert!(matches!(err, ArchiverError::Parse(ref m) if m.contains("missing")));

        let mut numeric = asset("", false);
        numeric.updated = Some(Value::from(1_714_521_600));
        let err = is_archive_eligible(&numeric, now(), 30).unwrap_err();
        assert!(matches!(err, ArchiverError::Parse(ref m) if m.contains("1714521600")));

        numeric.archived = true;
        assert!(!is_archive_eligible(&numeric, now(), 30).unwrap());
    }
}
