//! timefill CLI - Attendance timesheet filler
//!
//! Fills a spreadsheet attendance template with a random distribution of
//! work hours and marks absence days.

mod report;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use timefill_core::{AbsenceEntry, CalendarGrid};
use timefill_solver::{generate_timesheet, map_calendar, output_file_name, TimesheetRequest};
use timefill_xlsx::XlsxSheet;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use report::{ExitCode, OutputFormat};

#[derive(Parser)]
#[command(name = "timefill")]
#[command(author, version, about = "Fill attendance timesheet templates", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a template with hours and absences
    Fill {
        /// Blank template workbook
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// First name
        #[arg(long)]
        name: String,

        /// Surname
        #[arg(long)]
        surname: String,

        /// Hours to distribute
        #[arg(long, value_name = "HOURS")]
        total_hours: u32,

        /// Most hours a single day may receive
        #[arg(long, value_name = "HOURS")]
        max_per_day: u32,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        start: NaiveDate,

        /// Day closing the range, itself left out (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        end: NaiveDate,

        /// Absence as DATE/CODE with CODE one of F, P, M, A, CG (repeatable)
        #[arg(short, long = "absence", value_name = "DATE/CODE")]
        absences: Vec<AbsenceEntry>,

        /// Output workbook (default: next to the template)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Layout file overriding the stock template layout
        #[arg(long, env = "TIMEFILL_LAYOUT")]
        layout: Option<PathBuf>,

        /// Seed the random distribution
        #[arg(long)]
        seed: Option<u64>,

        /// Summary format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the selectable days of a template
    Days {
        /// Template workbook
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// Layout file overriding the stock template layout
        #[arg(long, env = "TIMEFILL_LAYOUT")]
        layout: Option<PathBuf>,

        /// Listing format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Create a blank template for a year
    Template {
        /// Calendar year
        #[arg(long)]
        year: i32,

        /// Output workbook
        #[arg(short, long)]
        output: PathBuf,

        /// Layout file overriding the stock template layout
        #[arg(long, env = "TIMEFILL_LAYOUT")]
        layout: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the template layout as TOML
    Layout {
        /// Layout file to validate and print instead of the default
        #[arg(long, env = "TIMEFILL_LAYOUT")]
        layout: Option<PathBuf>,
    },
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            eprintln!("{}", report::error_message(&err));
            ExitCode::Failure.into()
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Fill {
            template,
            name,
            surname,
            total_hours,
            max_per_day,
            start,
            end,
            absences,
            output,
            layout,
            seed,
            format,
        } => {
            let grid = load_layout(layout.as_deref())?;
            let request = TimesheetRequest::new(name, surname)
                .hours(total_hours, max_per_day)
                .between(start, end)
                .absences(absences);
            let output = output.unwrap_or_else(|| default_output(&template, &request));
            cmd_fill(&template, &output, &grid, &request, seed, format)
        }
        Commands::Days {
            template,
            layout,
            format,
        } => {
            let grid = load_layout(layout.as_deref())?;
            let sheet = XlsxSheet::load(&template)?;
            let map = map_calendar(&sheet, &grid)
                .with_context(|| format!("cannot read the calendar of {}", template.display()))?;
            report::print_days(&mut io::stdout().lock(), format, map.days())?;
            Ok(())
        }
        Commands::Template {
            year,
            output,
            layout,
            force,
        } => {
            if output.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", output.display());
            }
            let grid = load_layout(layout.as_deref())?;
            XlsxSheet::template(&grid, year)?.save(&output)?;
            println!("Created: {}", output.display());
            Ok(())
        }
        Commands::Layout { layout } => {
            let grid = load_layout(layout.as_deref())?;
            print!("{}", grid.to_toml_string()?);
            Ok(())
        }
    }
}

fn cmd_fill(
    template: &Path,
    output: &Path,
    grid: &CalendarGrid,
    request: &TimesheetRequest,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let mut sheet = XlsxSheet::load(template)?;
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let report = generate_timesheet(&mut sheet, grid, request, &mut rng)
        .with_context(|| format!("cannot fill {}", template.display()))?;

    sheet.save(output)?;
    info!(output = %output.display(), "timesheet saved");

    report::print_fill(
        &mut io::stdout().lock(),
        format,
        output,
        &report,
        request.max_per_day,
    )?;
    Ok(())
}

fn load_layout(path: Option<&Path>) -> Result<CalendarGrid> {
    match path {
        Some(path) => CalendarGrid::load(path)
            .with_context(|| format!("cannot load layout {}", path.display())),
        None => Ok(CalendarGrid::default()),
    }
}

fn default_output(template: &Path, request: &TimesheetRequest) -> PathBuf {
    let name = output_file_name(&request.name, &request.surname);
    template
        .parent()
        .map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name))
}
