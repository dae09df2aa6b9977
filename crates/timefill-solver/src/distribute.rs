//! Hour Distributor
//!
//! Spreads a budget of hours over a list of days at random. Each round picks
//! a day uniformly, rejects it if it is already at the daily cap, otherwise
//! gives it a random number of hours between one and whatever is left (or
//! whatever still fits).
//!
//! The caller must make sure the hours fit (`days × max_per_day >= total`).
//! A draw cap turns a violated precondition into an error instead of an
//! endless loop.

use rand::Rng;
use timefill_core::{DayCell, HourAssignment, Result, TimesheetError};
use tracing::trace;

/// Upper bound on random draws for a given problem size
fn draw_cap(total_hours: u32, days: usize) -> u64 {
    let total = u64::from(total_hours) + 1;
    let days = days as u64 + 1;
    1_000u64.saturating_add(total.saturating_mul(days).saturating_mul(64))
}

/// Randomly split `total_hours` over `days`, at most `max_per_day` each
pub fn distribute_hours<R: Rng>(
    total_hours: u32,
    max_per_day: u32,
    days: &[DayCell],
    rng: &mut R,
) -> Result<HourAssignment> {
    let mut assignment = HourAssignment::zeroed(days);
    let mut remaining = total_hours;

    if remaining > 0 && days.is_empty() {
        return Err(TimesheetError::Internal(format!(
            "no days to place {remaining} hours on"
        )));
    }

    let cap = draw_cap(total_hours, days.len());
    let mut draws = 0u64;

    while remaining > 0 {
        draws += 1;
        if draws > cap {
            return Err(TimesheetError::Internal(format!(
                "gave up after {cap} draws with {remaining} hours left \
                 ({} days, at most {max_per_day} per day)",
                days.len()
            )));
        }

        let index = rng.gen_range(0..days.len());
        let room = max_per_day.saturating_sub(assignment.hours_at(index));
        if room == 0 {
            continue;
        }

        let hours = rng.gen_range(1..=room.min(remaining));
        assignment.add(index, hours)?;
        remaining -= hours;
        trace!(cell = %days[index].address, hours, remaining, "assigned");
    }

    Ok(assignment)
}
