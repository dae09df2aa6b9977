//! Spreadsheet coordinate codec
//!
//! Converts between column labels ("AG") and 1-based column numbers, and
//! between A1-style address strings and [`CellAddress`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Result, TimesheetError};

/// A cell position: 1-based column number and 1-based row number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellAddress {
    pub column: u32,
    pub row: u32,
}

impl CellAddress {
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Same column, different row
    pub const fn with_row(self, row: u32) -> Self {
        Self {
            column: self.column,
            row,
        }
    }

    /// The cell directly above, if any
    pub fn above(self) -> Option<Self> {
        (self.row > 1).then(|| self.with_row(self.row - 1))
    }

    /// Column label ("A", "AG", ...)
    pub fn column_label(&self) -> String {
        number_to_column(self.column).unwrap_or_default()
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_label(), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self> {
        let (label, row) = split_address(s)?;
        Ok(Self {
            column: column_to_number(&label)?,
            row,
        })
    }
}

impl TryFrom<String> for CellAddress {
    type Error = TimesheetError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CellAddress> for String {
    fn from(address: CellAddress) -> Self {
        address.to_string()
    }
}

/// Convert a column label to its number (A=1, Z=26, AA=27)
pub fn column_to_number(label: &str) -> Result<u32> {
    if label.is_empty() {
        return Err(TimesheetError::Parse("empty column label".into()));
    }
    label.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return Err(TimesheetError::Parse(format!(
                "invalid column label: {label}"
            )));
        }
        let digit = u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        acc.checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| TimesheetError::Parse(format!("column label too long: {label}")))
    })
}

/// Convert a column number to its label (1 -> A, 27 -> AA)
pub fn number_to_column(n: u32) -> Result<String> {
    if n == 0 {
        return Err(TimesheetError::Parse("column numbers start at 1".into()));
    }
    let mut label = Vec::new();
    let mut n = n;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    Ok(label.into_iter().map(char::from).collect())
}

/// Split an address like "AG12" into its column label and row number
///
/// The label is returned uppercased.
pub fn split_address(address: &str) -> Result<(String, u32)> {
    let invalid = || TimesheetError::Parse(format!("invalid cell address: {address:?}"));

    let digits_at = address
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or_else(invalid)?;
    let (letters, digits) = address.split_at(digits_at);

    if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let row: u32 = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok((letters.to_ascii_uppercase(), row))
}

/// Every cell from `start` to `end` inclusive, left to right on one row
pub fn cells_between(start: CellAddress, end: CellAddress) -> Result<Vec<CellAddress>> {
    if start.row != end.row || start.column > end.column {
        return Err(TimesheetError::InvalidSpan { start, end });
    }
    Ok((start.column..=end.column)
        .map(|column| CellAddress::new(column, start.row))
        .collect())
}
