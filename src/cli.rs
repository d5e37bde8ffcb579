// src/cli.rs
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use log::info;

use crate::config::consts::{DEFAULT_DAYS, OVERVIEW_URL};
use crate::config::options::{AppOptions, OutputFormat, ScheduleQuery};
use crate::{report, runner};

/// Lecture plans from the THWS business faculty, on the command line.
#[derive(Parser, Debug)]
#[command(name = "plan_scrape", author, version, about, long_about = None)]
pub struct Args {
    /// Overview page listing every program's plans
    #[arg(long, global = true, default_value = OVERVIEW_URL)]
    pub base_url: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List programs and semesters with a published plan
    List {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Lectures of one program/semester for the next few days
    Schedule {
        /// Program abbreviation, e.g. BBA
        course: String,
        /// Semester number
        semester: u32,
        /// Days after the start date to include (0 = start date only)
        #[arg(long, default_value_t = DEFAULT_DAYS)]
        days: u32,
        /// Start date, YYYY-MM-DD (default: today)
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse a saved plan document offline
    Parse {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Log every cell that was skipped, and why
        #[arg(long)]
        diagnostics: bool,
    },
}

impl Command {
    fn format(&self) -> OutputFormat {
        match self {
            Command::List { format } | Command::Schedule { format, .. } | Command::Parse { format, .. } => *format,
        }
    }
}

pub fn run(args: &Args) -> color_eyre::Result<()> {
    let opts = AppOptions {
        overview_url: args.base_url.clone(),
        format: args.command.format(),
    };
    let json = opts.format == OutputFormat::Json;

    let out = match &args.command {
        Command::List { .. } => {
            let catalog = runner::available(&opts)?;
            if json { report::to_json(&catalog)? } else { report::catalog_text(&catalog) }
        }
        Command::Schedule { course, semester, days, from, .. } => {
            let query = ScheduleQuery { days: *days, from: *from, ..ScheduleQuery::new(course, *semester) };
            let result = runner::schedule(&opts, &query, Local::now().date_naive())?;
            info!("{} lectures between {} and {}", result.entries.len(), result.from, result.until);
            if json { report::to_json(&result)? } else { report::schedule_text(&result) }
        }
        Command::Parse { file, diagnostics, .. } => {
            let days = runner::parse_file(file, *diagnostics)?;
            if json {
                report::to_json(&days)?
            } else {
                report::entries_text(&runner::entries(days))
            }
        }
    };

    print!("{out}");
    if json {
        println!();
    }
    Ok(())
}
