//! Month grid arithmetic for calendar views.
//!
//! Weekdays are Monday-anchored (Monday = 0 .. Sunday = 6). Grids are laid out
//! Sunday-first, so the number of leading padding cells is the weekday shifted
//! by one.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Days in a week, i.e. the width of a grid row.
pub const DAYS_IN_WEEK: u32 = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid date: year {year}, month {month}")]
    InvalidDate { year: i32, month: u32 },
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidDate { year, month })
}

/// Weekday of the first day of the month (Monday = 0 .. Sunday = 6).
pub fn start_weekday(year: i32, month: u32) -> Result<u32, CalendarError> {
    Ok(first_of_month(year, month)?.weekday().num_days_from_monday())
}

/// Number of days in the month.
///
/// Computed as the day before the first of the following month, so leap years
/// fall out of the date arithmetic.
pub fn last_day_of_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let invalid = CalendarError::InvalidDate { year, month };

    // Validate the target month first; month 13 must not roll over.
    first_of_month(year, month)?;

    let next = if month == 12 {
        let next_year = year.checked_add(1).ok_or_else(|| invalid.clone())?;
        first_of_month(next_year, 1)
    } else {
        first_of_month(year, month + 1)
    }
    .map_err(|_| invalid.clone())?;

    next.pred_opt().map(|last| last.day()).ok_or(invalid)
}

/// Leading empty cells needed to place a Monday-anchored weekday in a
/// Sunday-first grid.
pub fn sunday_first_padding(weekday: u32) -> u32 {
    (weekday + 1) % DAYS_IN_WEEK
}

/// Padded day grid for a month: zeros for the cells before day 1, then
/// `1..=last_day`.
pub fn month_grid(year: i32, month: u32) -> Result<Vec<u32>, CalendarError> {
    let padding = sunday_first_padding(start_weekday(year, month)?);
    let last_day = last_day_of_month(year, month)?;

    let mut grid = Vec::with_capacity((padding + last_day) as usize);
    grid.extend(std::iter::repeat(0).take(padding as usize));
    grid.extend(1..=last_day);
    Ok(grid)
}
