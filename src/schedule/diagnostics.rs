// src/schedule/diagnostics.rs
use std::fmt;

use log::{debug, warn};

/// Why a cell did not end up as a Day or Lecture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// Day-header cell without a `Wd, DD.MM.YY` date.
    UnrecognizedHeader,
    /// Lecture cell outside every Day's columns.
    Unroutable,
    /// No `H:MM - H:MM` line in the text.
    NoTimeRange,
    /// Fewer than five lines after the time line.
    MissingFields,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DropReason::UnrecognizedHeader => "day header without date",
            DropReason::Unroutable => "lecture outside all day columns",
            DropReason::NoTimeRange => "no time range",
            DropReason::MissingFields => "missing subject/title/type/instructor/room",
        };
        f.write_str(s)
    }
}

/// A dropped cell: where it was and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dropped {
    /// Grid row; 0 is the header row.
    pub row: usize,
    pub col: usize,
    pub reason: DropReason,
    /// Cell text, tags stripped, single line.
    pub text: String,
}

/// Receives cells the extractor throws away.
/// Parsing never fails; implement this to find out what it skipped.
pub trait DropSink {
    fn dropped(&mut self, _drop: Dropped) {}
}

/// Default sink; drops stay silent.
pub struct NullSink;
impl DropSink for NullSink {}

/// Collects every drop for later inspection.
#[derive(Debug, Default)]
pub struct DropLog(pub Vec<Dropped>);

impl DropSink for DropLog {
    fn dropped(&mut self, drop: Dropped) {
        self.0.push(drop);
    }
}

/// Forwards drops to the `log` facade.
/// Lecture-text drops go to `warn`, layout drops to `debug`.
pub struct LogSink;

impl DropSink for LogSink {
    fn dropped(&mut self, d: Dropped) {
        match d.reason {
            DropReason::UnrecognizedHeader | DropReason::Unroutable => {
                debug!("dropped r{} c{}: {} ({:?})", d.row, d.col, d.reason, d.text)
            }
            _ => warn!("dropped r{} c{}: {} ({:?})", d.row, d.col, d.reason, d.text),
        }
    }
}
