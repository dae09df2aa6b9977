//! Day Filter: absences and the start/end window

use serde::Serialize;
use timefill_core::{
    AbsenceEntry, CalendarDate, CalendarGrid, CellAddress, CellValue, DayCell, Result, Sheet,
    TimesheetError,
};
use tracing::debug;

use crate::mapper::CalendarMap;
use crate::mirror::write_entry;

/// An absence that was written into the template
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AppliedAbsence {
    pub entry: AbsenceEntry,
    pub address: CellAddress,
}

/// Write each absence label into its day (and mirror) and drop the day
///
/// Fails with a lookup error on the first entry whose date is not a
/// selectable day still present in `map`.
pub fn apply_absences<S: Sheet + ?Sized>(
    sheet: &mut S,
    grid: &CalendarGrid,
    map: &mut CalendarMap,
    absences: &[AbsenceEntry],
) -> Result<Vec<AppliedAbsence>> {
    let mut applied = Vec::with_capacity(absences.len());

    for entry in absences {
        let key = entry.key();
        let day = map.remove(key).ok_or(TimesheetError::Lookup(key))?;
        write_entry(sheet, grid, day.address, CellValue::from(entry.kind.label()))?;
        debug!(date = %key, cell = %day.address, code = %entry.kind, "absence applied");
        applied.push(AppliedAbsence {
            entry: *entry,
            address: day.address,
        });
    }
    Ok(applied)
}

/// Days from `start` up to, but not including, `end`
///
/// Positions are taken from the lookup table's key order and used to slice
/// the day list. A start at or after the end gives an empty list.
pub fn filter_by_range(
    map: &CalendarMap,
    start: CalendarDate,
    end: CalendarDate,
) -> Result<Vec<DayCell>> {
    let from = map.position(start).ok_or(TimesheetError::Range(start))?;
    let to = map.position(end).ok_or(TimesheetError::Range(end))?;

    let days = map.days();
    let to = to.min(days.len());
    let from = from.min(to);
    debug!(%start, %end, from, to, "date window");
    Ok(days[from..to].to_vec())
}
