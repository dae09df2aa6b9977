//! Write-back of day entries
//!
//! Every entry lands twice: in the day cell and in the same column of the
//! month's mirror row further down the template.

use timefill_core::{
    CalendarGrid, CellAddress, CellValue, HourAssignment, Result, Sheet, TimesheetError,
};

/// Write `value` with the highlight fill into a day cell and its mirror
///
/// Empty values and zero hours are skipped. Returns whether anything was
/// written.
pub fn write_entry<S: Sheet + ?Sized>(
    sheet: &mut S,
    grid: &CalendarGrid,
    address: CellAddress,
    value: CellValue,
) -> Result<bool> {
    let skip = match &value {
        CellValue::Empty => true,
        CellValue::Number(n) => *n <= 0.0,
        CellValue::Text(_) => false,
    };
    if skip {
        return Ok(false);
    }

    let mirror = grid.mirror_of(address).ok_or_else(|| {
        TimesheetError::Layout(format!("row {} is not a month row", address.row))
    })?;

    for target in [address, mirror] {
        sheet.set_value(target, value.clone());
        sheet.set_color(target, &grid.highlight_color);
    }
    Ok(true)
}

/// Write every non-zero entry of an assignment; returns how many days were written
pub fn write_assignment<S: Sheet + ?Sized>(
    sheet: &mut S,
    grid: &CalendarGrid,
    assignment: &HourAssignment,
) -> Result<usize> {
    let mut written = 0;
    for (address, hours) in assignment.iter() {
        if write_entry(sheet, grid, address, CellValue::from(hours))? {
            written += 1;
        }
    }
    Ok(written)
}
