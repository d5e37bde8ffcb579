// src/specs/plan.rs
//! Scraping *spec* for a lecture plan document.
//!
//! Layout of the page:
//! ```text
//! <div class="w2">Studienwoche 44 ...</div>
//! <table>
//!   <tr><td>…</td><td class="t" colspan=2>Mo, 27.10.25</td>…</tr>   ← day header row
//!   <tr><td>08:15</td><td class="v" rowspan=4 id="…">08:15 - 09:45<br>…</td>…</tr>
//!   …
//! </table>
//! <div class="w2">Studienwoche 45 ...</div>
//! <table>…</table>
//! ```
//!
//! This file only turns markup into [`Cell`] rows; the span walk and text
//! parsing live in `schedule`.

use log::{debug, info};

use crate::config::consts::{DAY_HEADER_CLASS, LECTURE_CLASS, WEEK_HEADING_CLASS};
use crate::core::{html, net};
use crate::core::html::{attr_value, blocks, has_class, inner_after_open_tag, opener, span_attr, text_of};
use crate::error::Result;
use crate::schedule::{self, Cell, CellRole, Day, DropSink, NullSink, Row, Week};

/// One week heading and the rows of the table under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekGrid {
    pub label: Option<String>,
    pub rows: Vec<Row>,
}

/// Download a plan document and parse every week in it.
pub fn fetch(url: &str) -> Result<Vec<Week>> {
    let doc = net::http_get(url)?;
    let t = std::time::Instant::now();
    let weeks = parse_doc(&doc);
    info!("Plan: {} weeks parsed in {:?}", weeks.len(), t.elapsed());
    Ok(weeks)
}

/// All weeks of a plan document.
pub fn parse_doc(doc: &str) -> Vec<Week> {
    parse_doc_with(doc, &mut NullSink)
}

pub fn parse_doc_with(doc: &str, sink: &mut dyn DropSink) -> Vec<Week> {
    read_weeks(doc)
        .into_iter()
        .map(|g| Week {
            label: g.label,
            days: schedule::parse_week_with(&g.rows, sink),
        })
        .collect()
}

/// Days of every week, concatenated in document order.
pub fn read_days(doc: &str) -> Vec<Day> {
    parse_doc(doc).into_iter().flat_map(|w| w.days).collect()
}

/// Pair each `div.w2` heading with the first `<table>` after it (and before
/// the next heading). Headings without a table are skipped.
pub fn read_weeks(doc: &str) -> Vec<WeekGrid> {
    let headings = html::openers_with_class(doc, "<div", WEEK_HEADING_CLASS);
    let mut out = Vec::with_capacity(headings.len());

    for (i, &at) in headings.iter().enumerate() {
        let limit = headings.get(i + 1).copied().unwrap_or(doc.len());
        let section = &doc[at..limit];

        let label = html::next_tag_block_ci(section, "<div", "</div>", 0)
            .map(|(s, e)| text_of(inner_after_open_tag(&section[s..e])))
            .filter(|l| !l.is_empty());

        let Some((_, table)) = blocks(section, "<table", "</table>").next() else {
            debug!("Plan: heading {:?} has no table, skipped", label);
            continue;
        };
        out.push(WeekGrid { label, rows: read_rows(table) });
    }
    out
}

/// `<tr>` rows of a table as cells. The first row is always kept, since it
/// is the day header row even when it only holds `<th>`; later rows without
/// `<td>` are left out.
pub fn read_rows(table: &str) -> Vec<Row> {
    blocks(table, "<tr", "</tr>")
        .map(|(_, tr)| blocks(tr, "<td", "</td>").map(|(_, td)| read_cell(td)).collect::<Row>())
        .enumerate()
        .filter(|(i, row)| *i == 0 || !row.is_empty())
        .map(|(_, row)| row)
        .collect()
}

/// One `<td …>…</td>` block.
pub fn read_cell(td: &str) -> Cell {
    let op = opener(td);
    let role = if has_class(op, LECTURE_CLASS) {
        CellRole::Lecture
    } else if has_class(op, DAY_HEADER_CLASS) {
        CellRole::DayHeader
    } else {
        CellRole::Plain
    };

    let cell = Cell::new(role, inner_after_open_tag(td))
        .span(span_attr(op, "rowspan"), span_attr(op, "colspan"));
    match attr_value(op, "id") {
        Some(id) => cell.with_id(id.trim()),
        None => cell,
    }
}
