// src/runner.rs
use std::path::Path;

use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

use crate::{
    config::options::{AppOptions, ScheduleQuery},
    error::Result,
    schedule::{Day, DropSink, Lecture, LogSink, NullSink},
    specs::{self, catalog::{Catalog, Term}},
};

/// One lecture with the day it belongs to; the unit of schedule output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub weekday: String,
    pub lecture: Lecture,
}

/// What `schedule` found, plus enough context to print a header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub course: String,
    pub program: String,
    pub semester: u32,
    pub term: Option<Term>,
    pub url: String,
    pub from: NaiveDate,
    pub until: NaiveDate,
    pub entries: Vec<Entry>,
}

/// Catalog of every program listed on the overview page.
pub fn available(opts: &AppOptions) -> Result<Catalog> {
    specs::catalog::fetch(&opts.overview_url)
}

/// Lectures of one course/semester inside the query's day window.
/// Finding nothing is not an error.
pub fn schedule(opts: &AppOptions, query: &ScheduleQuery, today: NaiveDate) -> Result<ScheduleReport> {
    let catalog = available(opts)?;
    let (program, link) = catalog.lookup(&query.course, query.semester)?;
    info!("Plan for {} semester {}: {}", program.abbreviation, query.semester, link.url);

    let days: Vec<Day> = specs::plan::fetch(&link.url)?
        .into_iter()
        .flat_map(|w| w.days)
        .collect();
    if days.is_empty() {
        warn!("No dated days in {}", link.url);
    }

    let (from, until) = query.window(today);
    Ok(ScheduleReport {
        course: program.abbreviation.clone(),
        program: program.name.clone(),
        semester: query.semester,
        term: link.term,
        url: link.url.clone(),
        from,
        until,
        entries: select_window(days, from, until),
    })
}

/// Days of a saved plan document. With `diagnostics`, dropped cells are logged.
pub fn parse_file(path: &Path, diagnostics: bool) -> Result<Vec<Day>> {
    let doc = std::fs::read_to_string(path)?;
    let (mut log_sink, mut null_sink) = (LogSink, NullSink);
    let sink: &mut dyn DropSink = if diagnostics { &mut log_sink } else { &mut null_sink };

    let days: Vec<Day> = specs::plan::parse_doc_with(&doc, sink)
        .into_iter()
        .flat_map(|w| w.days)
        .collect();
    info!("{}: {} days", path.display(), days.len());
    Ok(days)
}

/// Flatten days inside `[from, until]` into entries sorted by (date, start).
pub fn select_window(days: Vec<Day>, from: NaiveDate, until: NaiveDate) -> Vec<Entry> {
    let mut out = entries(days.into_iter().filter(|d| from <= d.date && d.date <= until));
    out.sort_by_key(|e| (e.date, e.lecture.start));
    out
}

/// Flatten days into entries, keeping walk order.
pub fn entries(days: impl IntoIterator<Item = Day>) -> Vec<Entry> {
    days.into_iter()
        .flat_map(|day| {
            let (date, weekday) = (day.date, day.weekday);
            day.lectures.into_iter().map(move |lecture| Entry { date, weekday: weekday.clone(), lecture })
        })
        .collect()
}
