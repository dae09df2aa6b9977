//! Output formatting for CLI commands
//!
//! Successful runs print a short summary on stdout, either as text or as
//! JSON. Failures print one message on stderr and exit 1.
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success: the output workbook was written |
//! | 1 | Failure: nothing was written |

use std::io::{self, Write};
use std::path::Path;
use std::process;

use clap::ValueEnum;
use serde::Serialize;
use timefill_core::{CellAddress, DayCell, TimesheetError};
use timefill_solver::{AppliedAbsence, KeyCollision, TimesheetReport};

// ============================================================================
// Exit Code
// ============================================================================

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

// ============================================================================
// Fill
// ============================================================================

#[derive(Serialize)]
struct FillSummary<'a> {
    output: String,
    identity: &'a str,
    total_hours: u32,
    max_per_day: u32,
    days_in_range: usize,
    worked_days: usize,
    hours: Vec<DayHours>,
    absences: &'a [AppliedAbsence],
    collisions: &'a [KeyCollision],
}

#[derive(Serialize)]
struct DayHours {
    date: String,
    cell: CellAddress,
    hours: u32,
}

/// Print the outcome of `timefill fill`
pub fn print_fill<W: Write>(
    out: &mut W,
    format: OutputFormat,
    output: &Path,
    report: &TimesheetReport,
    max_per_day: u32,
) -> io::Result<()> {
    let hours = report
        .days
        .iter()
        .zip(report.assignment.iter())
        .map(|(day, (cell, hours))| DayHours {
            date: day.date.to_string(),
            cell,
            hours,
        })
        .collect();
    let summary = FillSummary {
        output: output.display().to_string(),
        identity: &report.identity,
        total_hours: report.assignment.total(),
        max_per_day,
        days_in_range: report.days.len(),
        worked_days: report.worked_days(),
        hours,
        absences: &report.absences,
        collisions: &report.collisions,
    };

    match format {
        OutputFormat::Json => write_json(out, &summary),
        OutputFormat::Text => {
            writeln!(out, "Filled: {}", summary.output)?;
            writeln!(out, "  Name:     {}", summary.identity)?;
            writeln!(
                out,
                "  Hours:    {} (max {} per day)",
                summary.total_hours, summary.max_per_day
            )?;
            writeln!(
                out,
                "  Days:     {} in range, {} worked",
                summary.days_in_range, summary.worked_days
            )?;
            for absence in summary.absences {
                writeln!(
                    out,
                    "  Absence:  {} {} ({})",
                    absence.entry.key(),
                    absence.entry.kind,
                    absence.address
                )?;
            }
            for collision in summary.collisions {
                writeln!(
                    out,
                    "  warning: {} appears twice in the template ({} replaced by {})",
                    collision.date, collision.replaced, collision.kept
                )?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// Days
// ============================================================================

#[derive(Serialize)]
struct DayEntry {
    date: String,
    month: u32,
    cell: CellAddress,
}

/// Print the selectable days of a template
pub fn print_days<W: Write>(out: &mut W, format: OutputFormat, days: &[DayCell]) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<DayEntry> = days
                .iter()
                .map(|d| DayEntry {
                    date: d.date.to_string(),
                    month: d.month,
                    cell: d.address,
                })
                .collect();
            write_json(out, &entries)
        }
        OutputFormat::Text => {
            for day in days {
                writeln!(out, "{:>5}  {}", day.date.to_string(), day.address)?;
            }
            writeln!(out, "{} selectable days", days.len())
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

// ============================================================================
// Errors
// ============================================================================

/// One-line message for a failed command
///
/// Known timesheet errors get a hint about the usual cause.
pub fn error_message(err: &anyhow::Error) -> String {
    let hint = err.chain().find_map(|cause| {
        cause.downcast_ref::<TimesheetError>().and_then(|e| match e {
            TimesheetError::Calculus { .. } => {
                Some("lower --total-hours, raise --max-per-day or widen the date range")
            }
            TimesheetError::Range(_) => {
                Some("start and end must be working days of the template, not holidays or absences")
            }
            TimesheetError::Lookup(_) => Some("absences can only be placed on working days"),
            _ => None,
        })
    });
    match hint {
        Some(hint) => format!("error: {err:#}\n  hint: {hint}"),
        None => format!("error: {err:#}"),
    }
}
