// src/schedule/types.rs
use std::fmt;
use std::ops::Range;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/* ---------------- Grid input ---------------- */

/// What a cell is, derived from its class markers by the reader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellRole {
    #[default]
    Plain,
    DayHeader,
    Lecture,
}

/// One `<td>` of a plan table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub role: CellRole,
    pub rowspan: usize, // >= 1
    pub colspan: usize, // >= 1
    /// Inner markup; may carry `<br>` line breaks and entities.
    pub text: String,
    pub id: Option<String>,
}

impl Cell {
    pub fn new(role: CellRole, text: impl Into<String>) -> Self {
        Self { role, rowspan: 1, colspan: 1, text: text.into(), id: None }
    }

    pub fn plain(text: impl Into<String>) -> Self { Self::new(CellRole::Plain, text) }
    pub fn day(text: impl Into<String>) -> Self { Self::new(CellRole::DayHeader, text) }
    pub fn lecture(text: impl Into<String>) -> Self { Self::new(CellRole::Lecture, text) }

    /// Spans below 1 are clamped to 1.
    pub fn span(mut self, rowspan: usize, colspan: usize) -> Self {
        self.rowspan = rowspan.max(1);
        self.colspan = colspan.max(1);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
        self
    }
}

pub type Row = Vec<Cell>;

/* ---------------- Parsed output ---------------- */

/// One calendar day of a week grid and the lectures routed to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Day {
    /// As printed, e.g. "Mo".
    pub weekday: String,
    /// `DD.MM.YY`, e.g. "27.10.25".
    pub short_date: String,
    pub date: NaiveDate,
    /// Columns `[start, end)` this day claims in the header row.
    #[serde(skip)]
    pub columns: Range<usize>,
    pub lectures: Vec<Lecture>,
}

impl Day {
    pub fn covers(&self, col: usize) -> bool {
        self.columns.contains(&col)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Lecture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub start: ClockTime,
    pub end: ClockTime,
    pub subject: String,
    pub title: String,
    pub session_type: String,
    pub instructor: String,
    pub room: String,
}

/// One labelled grid of a plan document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Week {
    /// Heading text above the table, e.g. "Studienwoche 44".
    pub label: Option<String>,
    pub days: Vec<Day>,
}

/// Wall-clock time as printed on a plan, `H:MM` or `HH:MM`.
///
/// Not range-checked: plans mark sessions that run to midnight as `24:00`.
/// Orders by (hour, minute).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// From the digit groups of a time match. `None` unless both fit in a `u8`.
    pub fn from_digits(hour: &str, minute: &str) -> Option<Self> {
        Some(Self::new(hour.parse().ok()?, minute.parse().ok()?))
    }
}

/// Always zero-padded `HH:MM`, so `8:15` on the page prints as `08:15`.
impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(self)
    }
}
