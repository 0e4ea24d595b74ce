//! Time dimension: calendar breakdown of every distinct raw arrival offset.
//!
//! Arrival dates are exported as a day count from 1960-01-01. An offset that
//! does not decode still gets a row, with every calendar column null.

use std::path::Path;

use chrono::{Datelike, Days, NaiveDate};
use itertools::Itertools;

use crate::dimension::BuildContext;
use crate::error::Result;
use crate::models::{TimeRow, TravelerRecord};

/// Reference date the arrival offsets count from
#[must_use]
pub fn arrival_epoch() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1960, 1, 1)
}

/// Decode a day offset into a calendar date; `None` if out of range
#[must_use]
pub fn decode_offset(offset: i64) -> Option<NaiveDate> {
    let epoch = arrival_epoch()?;
    let days = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        epoch.checked_add_days(days)
    } else {
        epoch.checked_sub_days(days)
    }
}

/// Parse a raw offset value. Fractional values are truncated toward zero.
#[must_use]
pub fn parse_offset(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(offset) = trimmed.parse::<i64>() {
        return Some(offset);
    }

    let value = trimmed.parse::<f64>().ok()?;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    (value.is_finite() && value.abs() < i64::MAX as f64).then(|| value.trunc() as i64)
}

/// Build the time row for one raw offset
#[must_use]
pub fn time_row(raw: Option<String>) -> TimeRow {
    let arrival_date = raw.as_deref().and_then(parse_offset).and_then(decode_offset);
    #[allow(clippy::cast_possible_wrap)]
    let part = |f: fn(&NaiveDate) -> u32| arrival_date.as_ref().map(|d| f(d) as i32);

    TimeRow {
        arrival_date,
        day: part(NaiveDate::day),
        month: part(NaiveDate::month),
        year: arrival_date.map(|d| d.year()),
        week: part(|d| d.iso_week().week()),
        weekday: part(|d| d.weekday().number_from_sunday()),
        arrival_date_raw: raw,
    }
}

/// Derive time rows, one per distinct raw offset (null included)
#[must_use]
pub fn derive_time_rows(travelers: &[TravelerRecord]) -> Vec<TimeRow> {
    let rows = travelers
        .iter()
        .map(|t| t.arrdate.clone())
        .unique()
        .map(time_row)
        .collect_vec();

    let undecoded = rows.iter().filter(|r| r.arrival_date.is_none()).count();
    if undecoded > 0 {
        log::debug!("{undecoded} arrival offsets could not be decoded to a date");
    }
    rows
}

/// Build and persist the time dimension
pub fn build_time_dimension(
    ctx: &BuildContext<'_>,
    travelers: &[TravelerRecord],
    output: &Path,
) -> Result<Vec<TimeRow>> {
    let rows = derive_time_rows(travelers);
    ctx.persist(&rows, output, "Time dimension")?;
    Ok(rows)
}
