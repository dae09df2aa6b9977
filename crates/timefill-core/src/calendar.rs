//! Calendar types: year-less dates, selectable day cells and absences

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{CellAddress, Result, TimesheetError};

/// A day of the year without the year, displayed as "day/month"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDate {
    pub day: u32,
    pub month: u32,
}

impl CalendarDate {
    /// Build a date; the day must be 1..=31 and the month 1..=12
    pub fn new(day: u32, month: u32) -> Result<Self> {
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return Err(TimesheetError::Parse(format!(
                "invalid calendar date {day}/{month}"
            )));
        }
        Ok(Self { day, month })
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day, self.month)
    }
}

impl FromStr for CalendarDate {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TimesheetError::Parse(format!("invalid day/month: {s:?}"));
        let (day, month) = s.split_once('/').ok_or_else(invalid)?;
        let day = day.trim().parse().map_err(|_| invalid())?;
        let month = month.trim().parse().map_err(|_| invalid())?;
        Self::new(day, month)
    }
}

/// A template cell that represents one selectable calendar day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DayCell {
    pub address: CellAddress,
    pub date: CalendarDate,
    /// 1 = January ... 12 = December, from the row the cell sits on
    pub month: u32,
}

/// Absence codes accepted by the template
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbsenceKind {
    /// Vacation ("F")
    #[serde(rename = "F")]
    Vacation,
    /// Paid leave ("P")
    #[serde(rename = "P")]
    Leave,
    /// Sick day ("M")
    #[serde(rename = "M")]
    Sick,
    /// Generic absence ("A")
    #[serde(rename = "A")]
    Absent,
    /// Furlough ("CG")
    #[serde(rename = "CG")]
    Furlough,
}

impl AbsenceKind {
    pub const ALL: [AbsenceKind; 5] = [
        AbsenceKind::Vacation,
        AbsenceKind::Leave,
        AbsenceKind::Sick,
        AbsenceKind::Absent,
        AbsenceKind::Furlough,
    ];

    /// The code written into the day cell
    pub const fn label(self) -> &'static str {
        match self {
            AbsenceKind::Vacation => "F",
            AbsenceKind::Leave => "P",
            AbsenceKind::Sick => "M",
            AbsenceKind::Absent => "A",
            AbsenceKind::Furlough => "CG",
        }
    }
}

impl fmt::Display for AbsenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AbsenceKind {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(code))
            .ok_or_else(|| {
                TimesheetError::Parse(format!(
                    "unknown absence code {code:?} (expected one of F, P, M, A, CG)"
                ))
            })
    }
}

/// A caller-supplied absence: the date and the code to write in its cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AbsenceEntry {
    pub date: NaiveDate,
    pub kind: AbsenceKind,
}

impl AbsenceEntry {
    pub fn new(date: NaiveDate, kind: AbsenceKind) -> Self {
        Self { date, kind }
    }

    /// Lookup key into the selectable-day table (year dropped)
    pub fn key(&self) -> CalendarDate {
        self.date.into()
    }
}

impl fmt::Display for AbsenceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.date.format("%Y-%m-%d"), self.kind)
    }
}

/// Parses "YYYY-MM-DD/CODE", e.g. "2024-03-01/F"
impl FromStr for AbsenceEntry {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self> {
        let (date, code) = s
            .rsplit_once('/')
            .ok_or_else(|| TimesheetError::Parse(format!("expected DATE/CODE, got {s:?}")))?;
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| TimesheetError::Parse(format!("invalid absence date {date:?}: {e}")))?;
        Ok(Self::new(date, code.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn calendar_date_drops_year() {
        let key = CalendarDate::from(date(2024, 3, 1));
        assert_eq!(key, CalendarDate::from(date(2021, 3, 1)));
        assert_eq!(key.to_string(), "1/3");
    }

    #[test]
    fn calendar_date_parses_day_month() {
        assert_eq!(
            "15/12".parse::<CalendarDate>().unwrap(),
            CalendarDate { day: 15, month: 12 }
        );
        assert!("32/1".parse::<CalendarDate>().is_err());
        assert!("1/13".parse::<CalendarDate>().is_err());
        assert!("1-3".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn absence_codes() {
        assert_eq!("F".parse::<AbsenceKind>().unwrap(), AbsenceKind::Vacation);
        assert_eq!("cg".parse::<AbsenceKind>().unwrap(), AbsenceKind::Furlough);
        assert!("X".parse::<AbsenceKind>().is_err());
        assert_eq!(AbsenceKind::Sick.label(), "M");
    }

    #[test]
    fn absence_entry_parses_form_format() {
        let entry: AbsenceEntry = "2024-03-01/F".parse().unwrap();
        assert_eq!(entry.date, date(2024, 3, 1));
        assert_eq!(entry.kind, AbsenceKind::Vacation);
        assert_eq!(entry.key(), CalendarDate { day: 1, month: 3 });
        assert_eq!(entry.to_string(), "2024-03-01/F");
    }

    #[test]
    fn absence_entry_rejects_garbage() {
        assert!("2024-03-01".parse::<AbsenceEntry>().is_err());
        assert!("01/03/2024/F".parse::<AbsenceEntry>().is_err());
        assert!("2024-02-30/F".parse::<AbsenceEntry>().is_err());
        assert!("2024-03-01/Z".parse::<AbsenceEntry>().is_err());
    }
}
