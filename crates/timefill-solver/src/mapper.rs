//! Calendar Mapper
//!
//! Scans the month rows of the template and collects every cell carrying the
//! "available" fill. Each such cell becomes a [`DayCell`]; its date comes
//! from the numeral printed in the row above and from the month row it sits
//! on.

use indexmap::IndexMap;
use serde::Serialize;
use timefill_core::{
    cells_between, CalendarDate, CalendarGrid, CellAddress, DayCell, Result, Sheet,
    TimesheetError,
};
use tracing::{debug, warn};

/// Two selectable cells that produced the same day/month key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct KeyCollision {
    pub date: CalendarDate,
    /// Cell the key pointed to before
    pub replaced: CellAddress,
    /// Cell the key points to now
    pub kept: CellAddress,
}

/// Selectable days in template order plus the date lookup table
///
/// The table keeps first-insertion order of its keys. When two cells map to
/// the same date the later cell wins the entry but the key keeps its
/// original position, so the table can be shorter than the day list.
#[derive(Clone, Debug, Default)]
pub struct CalendarMap {
    days: Vec<DayCell>,
    index: IndexMap<CalendarDate, DayCell>,
    collisions: Vec<KeyCollision>,
}

impl CalendarMap {
    /// Build a map from day cells in template order
    pub fn from_days(days: impl IntoIterator<Item = DayCell>) -> Self {
        let mut map = Self::default();
        for day in days {
            map.push(day);
        }
        map
    }

    fn push(&mut self, day: DayCell) {
        if let Some(previous) = self.index.insert(day.date, day) {
            warn!(
                date = %day.date,
                replaced = %previous.address,
                kept = %day.address,
                "two selectable cells share a day/month, keeping the later one"
            );
            self.collisions.push(KeyCollision {
                date: day.date,
                replaced: previous.address,
                kept: day.address,
            });
        }
        self.days.push(day);
    }

    /// Day cells in month order, then column order
    pub fn days(&self) -> &[DayCell] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, date: CalendarDate) -> Option<&DayCell> {
        self.index.get(&date)
    }

    /// Position of `date` among the table keys
    pub fn position(&self, date: CalendarDate) -> Option<usize> {
        self.index.get_index_of(&date)
    }

    /// Table keys in insertion order
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.index.keys().copied()
    }

    pub fn collisions(&self) -> &[KeyCollision] {
        &self.collisions
    }

    /// Drop the day for `date` from both the table and the day list
    pub fn remove(&mut self, date: CalendarDate) -> Option<DayCell> {
        let day = self.index.shift_remove(&date)?;
        if let Some(pos) = self.days.iter().position(|d| d.address == day.address) {
            self.days.remove(pos);
        }
        Some(day)
    }
}

/// Enumerate the selectable days of a template
pub fn map_calendar<S: Sheet + ?Sized>(sheet: &S, grid: &CalendarGrid) -> Result<CalendarMap> {
    let mut map = CalendarMap::default();

    for (position, month_row) in grid.months.iter().enumerate() {
        let month = position as u32 + 1;
        let (start, end) = grid.day_span(month_row.day_row)?;

        for address in cells_between(start, end)? {
            if sheet.color(address) != grid.available_color {
                continue;
            }
            let date = read_date(sheet, address, month)?;
            map.push(DayCell {
                address,
                date,
                month,
            });
        }
    }

    debug!(
        days = map.len(),
        collisions = map.collisions.len(),
        "mapped selectable days"
    );
    Ok(map)
}

/// Date of a selectable cell: numeral from the row above, month from the row
fn read_date<S: Sheet + ?Sized>(sheet: &S, address: CellAddress, month: u32) -> Result<CalendarDate> {
    let numeral_cell = address.above().ok_or_else(|| {
        TimesheetError::Parse(format!("day cell {address} has no numeral row above it"))
    })?;
    let value = sheet.value(numeral_cell);
    let day = value.as_day_numeral().ok_or_else(|| {
        TimesheetError::Parse(format!(
            "cell {numeral_cell} should hold the day number for {address}, found {value:?}"
        ))
    })?;
    CalendarDate::new(day, month)
}
