//! Blank attendance templates
//!
//! Lays out a year the way the stock template does: one row per month with
//! the day numbers printed just above it, Monday to Friday cells carrying
//! the "available" fill, weekends left plain.

use chrono::{Datelike, NaiveDate, Weekday};
use timefill_core::{CalendarGrid, CellAddress, CellValue, Result, Sheet, TimesheetError};
use tracing::debug;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Write a blank template for `year` into `sheet`
///
/// Returns the number of selectable days marked.
pub fn fill_template<S: Sheet + ?Sized>(
    sheet: &mut S,
    grid: &CalendarGrid,
    year: i32,
) -> Result<usize> {
    grid.validate()?;
    if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
        return Err(TimesheetError::Parse(format!("year {year} out of range")));
    }

    let (first_column, last_column) = grid.column_span()?;
    let label_column = first_column.saturating_sub(1).max(1);
    let mut marked = 0;

    sheet.set_value(
        CellAddress::new(1, 1),
        CellValue::from(format!("Attendance sheet {year}")),
    );
    if grid.identity_cell.column > 1 {
        sheet.set_value(
            CellAddress::new(grid.identity_cell.column - 1, grid.identity_cell.row),
            CellValue::from("Name"),
        );
    }

    for (month_row, (month, name)) in grid.months.iter().zip((1u32..).zip(MONTH_NAMES)) {
        if label_column < first_column {
            sheet.set_value(
                CellAddress::new(label_column, month_row.day_row),
                CellValue::from(name),
            );
            sheet.set_value(
                CellAddress::new(label_column, month_row.mirror_row),
                CellValue::from(name),
            );
        }

        for (column, day) in (first_column..=last_column).zip(1u32..) {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            let cell = CellAddress::new(column, month_row.day_row);
            sheet.set_value(cell.with_row(month_row.day_row - 1), CellValue::from(day));
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                sheet.set_color(cell, &grid.available_color);
                marked += 1;
            }
        }
    }

    debug!(year, marked, "template laid out");
    Ok(marked)
}
