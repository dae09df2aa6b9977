//! Template layout
//!
//! A [`CalendarGrid`] records where the twelve month rows of the attendance
//! template live, which columns hold days, where each month's summary
//! ("mirror") row is, and which fills mark selectable and filled cells.
//! The defaults describe the stock template; a TOML file may override them.
//!
//! ```toml
//! start_column = "C"
//! end_column = "AG"
//! identity_cell = "B4"
//! available_color = "theme:0"
//! highlight_color = "FFFFFF00"
//!
//! [[months]]
//! day_row = 9
//! mirror_row = 71
//! # ... eleven more, January to December
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{CellAddress, CellColor, Result, TimesheetError};

/// Day-label row of one month and the summary row that mirrors it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRow {
    pub day_row: u32,
    pub mirror_row: u32,
}

/// Physical layout of the timesheet template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarGrid {
    /// First column of the day span (day 1)
    pub start_column: String,
    /// Last column of the day span (day 31)
    pub end_column: String,
    /// Cell receiving "name surname"
    pub identity_cell: CellAddress,
    /// Fill marking a selectable day
    pub available_color: CellColor,
    /// Fill applied to every written entry
    pub highlight_color: CellColor,
    /// January to December
    pub months: Vec<MonthRow>,
}

const TEMPLATE_ROWS: [(u32, u32); 12] = [
    (9, 71),
    (13, 85),
    (17, 99),
    (21, 113),
    (25, 127),
    (29, 141),
    (33, 155),
    (37, 169),
    (41, 183),
    (45, 197),
    (49, 211),
    (53, 225),
];

impl Default for CalendarGrid {
    fn default() -> Self {
        Self {
            start_column: "C".into(),
            end_column: "AG".into(),
            identity_cell: CellAddress::new(2, 4),
            available_color: CellColor::Theme(0),
            highlight_color: CellColor::Rgb("FFFFFF00".into()),
            months: TEMPLATE_ROWS
                .iter()
                .map(|&(day_row, mirror_row)| MonthRow {
                    day_row,
                    mirror_row,
                })
                .collect(),
        }
    }
}

impl CalendarGrid {
    /// Parse and validate a layout from TOML
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let grid: CalendarGrid =
            toml::from_str(input).map_err(|e| TimesheetError::Layout(e.to_string()))?;
        grid.validate()?;
        Ok(grid)
    }

    /// Load a layout file
    pub fn load(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TimesheetError::Layout(e.to_string()))
    }

    /// Check the structural assumptions the mapper relies on
    pub fn validate(&self) -> Result<()> {
        if self.months.len() != 12 {
            return Err(TimesheetError::Layout(format!(
                "expected 12 month rows, found {}",
                self.months.len()
            )));
        }
        if let Some(row) = self.months.iter().find(|m| m.day_row < 2) {
            return Err(TimesheetError::Layout(format!(
                "day row {} leaves no room for the day numerals above it",
                row.day_row
            )));
        }
        if self.months.windows(2).any(|w| w[0].day_row >= w[1].day_row) {
            return Err(TimesheetError::Layout(
                "month rows must be listed January to December with increasing rows".into(),
            ));
        }
        let (start, end) = self.column_span()?;
        if start > end {
            return Err(TimesheetError::Layout(format!(
                "start column {} is right of end column {}",
                self.start_column, self.end_column
            )));
        }
        Ok(())
    }

    /// First and last column numbers of the day span
    pub fn column_span(&self) -> Result<(u32, u32)> {
        Ok((
            crate::column_to_number(&self.start_column)?,
            crate::column_to_number(&self.end_column)?,
        ))
    }

    /// First and last cell of a month's day span
    pub fn day_span(&self, day_row: u32) -> Result<(CellAddress, CellAddress)> {
        let (start, end) = self.column_span()?;
        Ok((
            CellAddress::new(start, day_row),
            CellAddress::new(end, day_row),
        ))
    }

    /// Mirror row for a day-label row
    pub fn mirror_row(&self, day_row: u32) -> Option<u32> {
        self.months
            .iter()
            .find(|m| m.day_row == day_row)
            .map(|m| m.mirror_row)
    }

    /// Mirror cell for a cell on a day-label row
    pub fn mirror_of(&self, address: CellAddress) -> Option<CellAddress> {
        self.mirror_row(address.row).map(|row| address.with_row(row))
    }
}
