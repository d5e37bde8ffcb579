// src/config/options.rs
use chrono::{Days, NaiveDate};

use super::consts::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Which plan to load and which slice of it to keep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleQuery {
    /// Program abbreviation, e.g. "BBA". Matched case-insensitively.
    pub course: String,
    /// Semester number as printed on the overview page.
    pub semester: u32,
    /// Window length; 0 keeps only `from`.
    pub days: u32,
    /// First day of the window. `None` means today.
    pub from: Option<NaiveDate>,
}

impl ScheduleQuery {
    pub fn new(course: &str, semester: u32) -> Self {
        Self {
            course: course.trim().to_ascii_uppercase(),
            semester,
            days: DEFAULT_DAYS,
            from: None,
        }
    }

    /// Inclusive `[start, end]` window, anchored at `from` or `today`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = self.from.unwrap_or(today);
        let end = start
            .checked_add_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MAX);
        (start, end)
    }
}

/// Top-level runtime options shared by every command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub overview_url: String,
    pub format: OutputFormat,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            overview_url: s!(OVERVIEW_URL),
            format: OutputFormat::Text,
        }
    }
}
