//! # timefill-solver
//!
//! Fills an attendance template with a random distribution of hours.
//!
//! This crate provides:
//! - Calendar mapping: which template cells are selectable days
//! - Day filtering: absences and the start/end window
//! - Random hour distribution under a per-day cap
//! - Mirror write-back of every entry
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use timefill_core::{CalendarGrid, CellAddress, CellValue, MemorySheet, Sheet};
//! use timefill_solver::{generate_timesheet, TimesheetRequest};
//!
//! let grid = CalendarGrid::default();
//! let mut sheet = MemorySheet::new();
//! // Mark 1..=5 January as selectable
//! for day in 1..=5u32 {
//!     let cell = CellAddress::new(2 + day, 9);
//!     sheet.set_color(cell, &grid.available_color);
//!     sheet.set_value(cell.above().unwrap(), CellValue::from(day));
//! }
//!
//! let request = TimesheetRequest::new("Ada", "Lovelace")
//!     .hours(10, 4)
//!     .between(
//!         NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
//!     );
//! let report = generate_timesheet(&mut sheet, &grid, &request, &mut rand::thread_rng()).unwrap();
//! assert_eq!(report.assignment.total(), 10);
//! ```

pub mod distribute;
pub mod filter;
pub mod mapper;
pub mod mirror;

pub use distribute::distribute_hours;
pub use filter::{apply_absences, filter_by_range, AppliedAbsence};
pub use mapper::{map_calendar, CalendarMap, KeyCollision};
pub use mirror::{write_assignment, write_entry};

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use timefill_core::{
    AbsenceEntry, CalendarDate, CalendarGrid, CellValue, DayCell, HourAssignment, Result, Sheet,
    TimesheetError,
};
use tracing::{debug, info};

/// Everything the caller supplies for one timesheet
#[derive(Clone, Debug)]
pub struct TimesheetRequest {
    pub name: String,
    pub surname: String,
    pub total_hours: u32,
    pub max_per_day: u32,
    /// First day of the window (year ignored)
    pub start: NaiveDate,
    /// Day closing the window; itself excluded (year ignored)
    pub end: NaiveDate,
    pub absences: Vec<AbsenceEntry>,
}

impl TimesheetRequest {
    /// Whole-year window (1 January to 31 December), no hours, no absences
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            total_hours: 0,
            max_per_day: 0,
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2000, 12, 31).unwrap_or(NaiveDate::MAX),
            absences: Vec::new(),
        }
    }

    /// Set the hour budget and the daily cap
    pub fn hours(mut self, total: u32, max_per_day: u32) -> Self {
        self.total_hours = total;
        self.max_per_day = max_per_day;
        self
    }

    /// Set the date window
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Add an absence; an entry identical to one already listed is dropped
    pub fn absence(mut self, entry: AbsenceEntry) -> Self {
        if self.absences.contains(&entry) {
            debug!(absence = %entry, "duplicate absence ignored");
        } else {
            self.absences.push(entry);
        }
        self
    }

    pub fn absences(self, entries: impl IntoIterator<Item = AbsenceEntry>) -> Self {
        entries.into_iter().fold(self, Self::absence)
    }

    /// Text written into the identity cell
    pub fn identity(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Outcome of a successful run
#[derive(Clone, Debug, Serialize)]
pub struct TimesheetReport {
    pub identity: String,
    /// Days inside the window after absences were removed
    pub days: Vec<DayCell>,
    pub assignment: HourAssignment,
    pub absences: Vec<AppliedAbsence>,
    pub collisions: Vec<KeyCollision>,
}

impl TimesheetReport {
    /// Days that received at least one hour
    pub fn worked_days(&self) -> usize {
        self.assignment.iter().filter(|(_, h)| *h > 0).count()
    }
}

/// Fill `sheet` according to `request`
///
/// Writes the identity cell, labels absences, distributes the hours over the
/// remaining days of the window and writes them back. On error the sheet may
/// be partially modified and must not be saved.
pub fn generate_timesheet<S: Sheet + ?Sized, R: Rng>(
    sheet: &mut S,
    grid: &CalendarGrid,
    request: &TimesheetRequest,
    rng: &mut R,
) -> Result<TimesheetReport> {
    grid.validate()?;

    let identity = request.identity();
    sheet.set_value(grid.identity_cell, CellValue::from(identity.as_str()));

    let mut map = map_calendar(&*sheet, grid)?;
    let collisions = map.collisions().to_vec();

    let absences = apply_absences(sheet, grid, &mut map, &request.absences)?;
    let days = filter_by_range(
        &map,
        CalendarDate::from(request.start),
        CalendarDate::from(request.end),
    )?;

    check_capacity(request.total_hours, request.max_per_day, days.len())?;
    debug!(
        days = days.len(),
        total = request.total_hours,
        max_per_day = request.max_per_day,
        "distributing hours"
    );

    let assignment = distribute_hours(request.total_hours, request.max_per_day, &days, rng)?;
    let written = write_assignment(sheet, grid, &assignment)?;

    info!(
        identity = %identity,
        days = days.len(),
        worked = written,
        absences = absences.len(),
        "timesheet filled"
    );

    Ok(TimesheetReport {
        identity,
        days,
        assignment,
        absences,
        collisions,
    })
}

/// Fail unless `days × max_per_day` can hold `total_hours`
pub fn check_capacity(total_hours: u32, max_per_day: u32, days: usize) -> Result<()> {
    let capacity = (days as u64).saturating_mul(u64::from(max_per_day));
    if capacity < u64::from(total_hours) {
        return Err(TimesheetError::Calculus {
            requested: total_hours,
            capacity: u32::try_from(capacity).unwrap_or(u32::MAX),
        });
    }
    Ok(())
}

/// File name used for a filled timesheet
pub fn output_file_name(name: &str, surname: &str) -> String {
    format!("Foglio di presenza {name}_{surname} R&S compilato.xlsx")
}
