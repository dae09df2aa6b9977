//! # timefill-xlsx
//!
//! XLSX backend for timefill: a [`Sheet`] over the active worksheet of a
//! workbook, plus generation of blank attendance templates.
//!
//! Fills are read from the cell's pattern fill foreground colour, which is
//! where spreadsheet applications store a plain background fill.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use timefill_core::Sheet;
//! use timefill_xlsx::XlsxSheet;
//!
//! let mut sheet = XlsxSheet::load(Path::new("presenze.xlsx"))?;
//! sheet.set_value("B4".parse()?, "Mario Rossi".into());
//! sheet.save(Path::new("presenze-compilato.xlsx"))?;
//! # Ok::<(), timefill_core::TimesheetError>(())
//! ```

pub mod template;

pub use template::fill_template;

use std::path::Path;
use timefill_core::{CalendarGrid, CellAddress, CellColor, CellValue, Result, Sheet, TimesheetError};
use tracing::debug;
use umya_spreadsheet::{Color, Fill, PatternValues, Spreadsheet};

/// Active worksheet of an XLSX workbook
pub struct XlsxSheet {
    book: Spreadsheet,
}

impl XlsxSheet {
    /// Empty workbook with a single sheet
    pub fn new() -> Self {
        Self {
            book: umya_spreadsheet::new_file(),
        }
    }

    /// Blank attendance template for `year` laid out per `grid`
    pub fn template(grid: &CalendarGrid, year: i32) -> Result<Self> {
        let mut sheet = Self::new();
        fill_template(&mut sheet, grid, year)?;
        Ok(sheet)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
            TimesheetError::Spreadsheet(format!("cannot read {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "workbook loaded");
        Ok(Self { book })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path).map_err(|e| {
            TimesheetError::Spreadsheet(format!("cannot write {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "workbook saved");
        Ok(())
    }

    pub fn book(&self) -> &Spreadsheet {
        &self.book
    }
}

impl Default for XlsxSheet {
    fn default() -> Self {
        Self::new()
    }
}

/// umya addresses cells as (column, row), both 1-based
fn coordinate(address: CellAddress) -> (u32, u32) {
    (address.column, address.row)
}

/// Classify a fill colour by the one attribute the workbook stores
///
/// umya has no accessors telling which attribute is set (unset ones read as
/// 0 or ""), so each kind is recognised by rebuilding a colour with only
/// that attribute and comparing.
fn color_token(color: &Color) -> CellColor {
    if *color == Color::default() {
        return CellColor::None;
    }
    let theme = *color.get_theme_index();
    if stores_only(color, |c| {
        c.set_theme_index(theme);
    }) {
        return CellColor::Theme(theme);
    }
    let indexed = *color.get_indexed();
    if stores_only(color, |c| {
        c.set_indexed(indexed);
    }) {
        return CellColor::Indexed(indexed);
    }
    match color.get_argb() {
        "" => CellColor::None,
        argb => CellColor::Rgb(argb.to_ascii_uppercase()),
    }
}

fn stores_only(color: &Color, build: impl FnOnce(&mut Color)) -> bool {
    let mut candidate = Color::default();
    build(&mut candidate);
    if candidate == *color {
        return true;
    }
    candidate.set_tint(*color.get_tint());
    candidate == *color
}

impl Sheet for XlsxSheet {
    fn color(&self, address: CellAddress) -> CellColor {
        self.book
            .get_active_sheet()
            .get_cell(coordinate(address))
            .and_then(|cell| cell.get_style().get_background_color())
            .map_or(CellColor::None, color_token)
    }

    fn value(&self, address: CellAddress) -> CellValue {
        self.book
            .get_active_sheet()
            .get_cell(coordinate(address))
            .map_or(CellValue::Empty, |cell| CellValue::from_raw(&cell.get_value()))
    }

    fn set_value(&mut self, address: CellAddress, value: CellValue) {
        let cell = self
            .book
            .get_active_sheet_mut()
            .get_cell_mut(coordinate(address));
        match value {
            CellValue::Empty => {
                cell.set_value(String::new());
            }
            CellValue::Text(text) => {
                cell.set_value(text);
            }
            CellValue::Number(n) => {
                cell.set_value_number(n);
            }
        }
    }

    fn set_color(&mut self, address: CellAddress, color: &CellColor) {
        let style = self
            .book
            .get_active_sheet_mut()
            .get_cell_mut(coordinate(address))
            .get_style_mut();
        match color {
            CellColor::None => {
                style.set_fill(Fill::default());
            }
            CellColor::Theme(index) => {
                let pattern = style.get_fill_mut().get_pattern_fill_mut();
                pattern.set_pattern_type(PatternValues::Solid);
                pattern.get_foreground_color_mut().set_theme_index(*index);
            }
            CellColor::Indexed(index) => {
                let pattern = style.get_fill_mut().get_pattern_fill_mut();
                pattern.set_pattern_type(PatternValues::Solid);
                pattern.get_foreground_color_mut().set_indexed(*index);
            }
            // umya stores an ARGB value found in the legacy palette as that
            // palette index, so it reads back as `Indexed`
            CellColor::Rgb(argb) => {
                style.set_background_color(argb.as_str());
            }
        }
    }
}
