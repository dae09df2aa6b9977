//! The spreadsheet collaborator
//!
//! The timesheet logic only needs an addressable grid of coloured, valued
//! cells. [`Sheet`] is that seam; file formats implement it elsewhere.
//! [`MemorySheet`] is a plain in-memory grid.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::{CellAddress, Result, TimesheetError};

/// Fill colour of a cell
///
/// Textual form: `none`, `theme:N`, `indexed:N` or an (A)RGB hex string
/// such as `FFFFFF00`. Colours compare exactly: a theme or palette entry
/// never equals an RGB value, even one that looks the same on screen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CellColor {
    /// No fill
    #[default]
    None,
    /// Entry of the workbook theme's colour scheme (0 is the light background)
    Theme(u32),
    /// Entry of the legacy indexed palette
    Indexed(u32),
    /// Uppercase ARGB hex, e.g. "FFFFFF00"
    Rgb(String),
}

impl CellColor {
    pub fn rgb(hex: &str) -> Result<Self> {
        let hex = hex.trim().trim_start_matches('#').to_ascii_uppercase();
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TimesheetError::Parse(format!("invalid colour {hex:?}")));
        }
        match hex.len() {
            6 => Ok(Self::Rgb(format!("FF{hex}"))),
            8 => Ok(Self::Rgb(hex)),
            _ => Err(TimesheetError::Parse(format!("invalid colour {hex:?}"))),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellColor::None => f.write_str("none"),
            CellColor::Theme(i) => write!(f, "theme:{i}"),
            CellColor::Indexed(i) => write!(f, "indexed:{i}"),
            CellColor::Rgb(hex) => f.write_str(hex),
        }
    }
}

impl FromStr for CellColor {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(CellColor::None);
        }
        if let Some(index) = s.strip_prefix("theme:") {
            return parse_index(index).map(CellColor::Theme);
        }
        if let Some(index) = s.strip_prefix("indexed:") {
            return parse_index(index).map(CellColor::Indexed);
        }
        CellColor::rgb(s)
    }
}

fn parse_index(index: &str) -> Result<u32> {
    index
        .trim()
        .parse()
        .map_err(|_| TimesheetError::Parse(format!("invalid colour index {index:?}")))
}

impl TryFrom<String> for CellColor {
    type Error = TimesheetError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CellColor> for String {
    fn from(color: CellColor) -> Self {
        color.to_string()
    }
}

/// Content of a cell
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Interpret raw cell text: numbers become `Number`, blanks `Empty`
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else if let Ok(n) = trimmed.parse::<f64>() {
            CellValue::Number(n)
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// A whole number between 1 and 31, as printed above each day cell
    pub fn as_day_numeral(&self) -> Option<u32> {
        let n = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty => return None,
        };
        (n.fract() == 0.0 && (1.0..=31.0).contains(&n)).then_some(n as u32)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// An addressable grid of coloured, valued cells
pub trait Sheet {
    /// Fill colour of the cell
    fn color(&self, address: CellAddress) -> CellColor;

    /// Value of the cell (`Empty` when unset)
    fn value(&self, address: CellAddress) -> CellValue;

    fn set_value(&mut self, address: CellAddress, value: CellValue);

    fn set_color(&mut self, address: CellAddress, color: &CellColor);
}

#[derive(Clone, Debug, Default, PartialEq)]
struct MemoryCell {
    value: CellValue,
    color: CellColor,
}

/// In-memory [`Sheet`]
#[derive(Clone, Debug, Default)]
pub struct MemorySheet {
    cells: HashMap<CellAddress, MemoryCell>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells that hold a value or a fill
    pub fn populated(&self) -> usize {
        self.cells
            .values()
            .filter(|c| !c.value.is_empty() || c.color != CellColor::None)
            .count()
    }
}

impl Sheet for MemorySheet {
    fn color(&self, address: CellAddress) -> CellColor {
        self.cells
            .get(&address)
            .map(|c| c.color.clone())
            .unwrap_or_default()
    }

    fn value(&self, address: CellAddress) -> CellValue {
        self.cells
            .get(&address)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, address: CellAddress, value: CellValue) {
        self.cells.entry(address).or_default().value = value;
    }

    fn set_color(&mut self, address: CellAddress, color: &CellColor) {
        self.cells.entry(address).or_default().color = color.clone();
    }
}
