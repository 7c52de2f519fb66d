//! ISO-8601 UTC timestamps with millisecond precision, e.g. `2026-10-19T08:15:30.042Z`.

use serde::Serializer;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const ISO_8601_MILLIS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Formats `value` in UTC.
///
/// # Errors
/// Returns an error if the year cannot be represented in the format.
pub fn format(value: OffsetDateTime) -> Result<String, time::error::Format> {
    value.to_offset(UtcOffset::UTC).format(ISO_8601_MILLIS)
}

/// `serialize_with` adapter for [`format`].
///
/// # Errors
/// Propagates formatting failures as serializer errors.
pub fn serialize<S: Serializer>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = format(*value).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}
