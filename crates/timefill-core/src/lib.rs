//! # timefill-core
//!
//! Core domain model for the timefill timesheet filler.
//!
//! This crate provides:
//! - Coordinate codec: `CellAddress`, column labels, cell spans
//! - Calendar types: `CalendarDate`, `DayCell`, `AbsenceEntry`
//! - The static template layout: `CalendarGrid`
//! - The spreadsheet collaborator trait `Sheet` plus an in-memory grid
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```rust
//! use timefill_core::{cells_between, CellAddress};
//!
//! let start: CellAddress = "C9".parse().unwrap();
//! let end: CellAddress = "F9".parse().unwrap();
//! let span: Vec<String> = cells_between(start, end)
//!     .unwrap()
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(span, ["C9", "D9", "E9", "F9"]);
//! ```

pub mod calendar;
pub mod coord;
pub mod grid;
pub mod layout;

pub use calendar::{AbsenceEntry, AbsenceKind, CalendarDate, DayCell};
pub use coord::{cells_between, column_to_number, number_to_column, split_address, CellAddress};
pub use grid::{CellColor, CellValue, MemorySheet, Sheet};
pub use layout::{CalendarGrid, MonthRow};

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Hour Assignment
// ============================================================================

/// Hours assigned to each day of a filtered day list
///
/// Entries keep the order of the day list they were computed from and
/// include days that received zero hours.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HourAssignment {
    entries: Vec<(CellAddress, u32)>,
}

impl HourAssignment {
    /// Start an assignment with every day at zero hours
    pub fn zeroed(days: &[DayCell]) -> Self {
        Self {
            entries: days.iter().map(|d| (d.address, 0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hours assigned to the day at `address`, if it is part of the assignment
    pub fn get(&self, address: CellAddress) -> Option<u32> {
        self.entries
            .iter()
            .find(|(a, _)| *a == address)
            .map(|(_, h)| *h)
    }

    /// Add hours to the entry at `index`, returning its new total
    pub fn add(&mut self, index: usize, hours: u32) -> Result<u32> {
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| {
            TimesheetError::Internal(format!("no day at position {index} of {len}"))
        })?;
        entry.1 += hours;
        Ok(entry.1)
    }

    /// Hours currently held by the entry at `index`
    pub fn hours_at(&self, index: usize) -> u32 {
        self.entries.get(index).map_or(0, |(_, h)| *h)
    }

    /// Sum of all assigned hours
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, h)| h).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, u32)> + '_ {
        self.entries.iter().copied()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Timesheet generation error
#[derive(Debug, Error)]
pub enum TimesheetError {
    #[error("{requested} hours do not fit in the selected days (at most {capacity} hours)")]
    Calculus { requested: u32, capacity: u32 },

    #[error("Start or end date {0} is not a selectable day (holiday or absence?)")]
    Range(CalendarDate),

    #[error("Absence date {0} is not a selectable day")]
    Lookup(CalendarDate),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cells {start} and {end} do not form a left-to-right span on one row")]
    InvalidSpan { start: CellAddress, end: CellAddress },

    #[error("Invalid layout: {0}")]
    Layout(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias used across the timefill crates
pub type Result<T> = std::result::Result<T, TimesheetError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(addr: &str, day: u32, month: u32) -> DayCell {
        DayCell {
            address: addr.parse().unwrap(),
            date: CalendarDate::new(day, month).unwrap(),
            month,
        }
    }

    #[test]
    fn zeroed_assignment_covers_every_day() {
        let days = vec![day("C9", 1, 1), day("D9", 2, 1)];
        let assignment = HourAssignment::zeroed(&days);

        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.total(), 0);
        assert_eq!(assignment.get("D9".parse().unwrap()), Some(0));
        assert_eq!(assignment.get("E9".parse().unwrap()), None);
    }

    #[test]
    fn add_accumulates_per_entry() {
        let days = vec![day("C9", 1, 1), day("D9", 2, 1)];
        let mut assignment = HourAssignment::zeroed(&days);

        assert_eq!(assignment.add(1, 3).unwrap(), 3);
        assert_eq!(assignment.add(1, 1).unwrap(), 4);

        assert_eq!(assignment.hours_at(1), 4);
        assert_eq!(assignment.total(), 4);
    }

    #[test]
    fn add_past_the_end_is_an_error() {
        let days = vec![day("C9", 1, 1), day("D9", 2, 1)];
        let mut assignment = HourAssignment::zeroed(&days);

        let err = assignment.add(7, 5).unwrap_err();
        assert!(matches!(err, TimesheetError::Internal(_)));
        assert_eq!(assignment.total(), 0);
    }

    #[test]
    fn calculus_error_message_names_capacity() {
        let err = TimesheetError::Calculus {
            requested: 50,
            capacity: 40,
        };
        assert_eq!(
            err.to_string(),
            "50 hours do not fit in the selected days (at most 40 hours)"
        );
    }
}
