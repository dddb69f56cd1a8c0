//! Field rules for Bitvavo to Parqet conversion.
//!
//! All numeric handling is textual: values are never parsed as numbers,
//! so whatever Bitvavo wrote passes through with only the separator swapped.

use chrono::{NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{TransformError, TransformResult};

/// Substituted for absent or empty numeric fields.
pub const ZERO_DECIMAL: &str = "0,00";

/// Parqet asset type for every converted row.
pub const ASSET_TYPE: &str = "Crypto";

/// Parqet transaction type for every converted row.
pub const PARQET_BUY: &str = "Buy";

/// Bitvavo does not report tax on trades.
pub const TAX: &str = "0,00";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// `YYYY-M-D H:M:S.f` with 1-2 digit fields and a 1-6 digit fraction.
static TIMESTAMP_SHAPE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2} [0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}\.[0-9]{1,6}$").ok()
});

/// Replace every `.` with `,`.
pub fn swap_decimal_separator(raw: &str) -> String {
    raw.replace('.', ",")
}

/// Swap the separator of a present value, or fall back to [`ZERO_DECIMAL`].
pub fn decimal_or_zero(raw: Option<&str>) -> String {
    match raw {
        Some(value) if !value.is_empty() => swap_decimal_separator(value),
        _ => ZERO_DECIMAL.to_string(),
    }
}

/// Drop a single leading minus sign.
pub fn strip_sign(value: &str) -> &str {
    value.strip_prefix('-').unwrap_or(value)
}

/// Parse Bitvavo's separate `Date` and `Time` columns.
///
/// Times without fractional seconds are read as `.000`. The year must have
/// four digits, the fraction 1 to 6, and seconds stop at 59.
pub fn parse_timestamp(date: &str, time: &str, line: u64) -> TransformResult<NaiveDateTime> {
    let value = if time.contains('.') {
        format!("{date} {time}")
    } else {
        format!("{date} {time}.000")
    };

    let err = || TransformError::DateParse {
        line,
        value: value.clone(),
    };

    let shaped = TIMESTAMP_SHAPE
        .as_ref()
        .is_some_and(|re| re.is_match(&value));
    if !shaped {
        return Err(err());
    }

    let timestamp = NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT).map_err(|_| err())?;

    // chrono reads second 60 as a leap second
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(err());
    }

    Ok(timestamp)
}

/// `yyyy-MM-dd`
pub fn format_date(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// `yyyy-MM-ddTHH:mm:ss.fffZ`, milliseconds truncated.
///
/// The wall-clock time is labelled UTC as-is; no offset is applied.
pub fn format_datetime(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
