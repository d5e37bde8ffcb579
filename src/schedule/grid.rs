// src/schedule/grid.rs
//! Column bookkeeping for span-merged tables.
//!
//! A plan table lays out a week as columns, one or more per day. Cells carry
//! `colspan`/`rowspan`, so a cell's column is implicit: it is the first
//! column not already covered by a span from an earlier row. This module
//! makes it explicit.
//!
//! - [`layout_header_row`] turns the first row into [`Day`]s with their
//!   column ranges.
//! - [`advance_row`] places each later row's cells, consuming and
//!   registering row-span [`Occupancy`] as it goes.

use std::collections::BTreeMap;
use std::ops::Range;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::consts::CENTURY;
use crate::core::html::text_of;
use super::types::{Cell, CellRole, Day};

/// "Mo, 27.10.25": weekday word, comma, DD.MM.YY.
static DAY_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+),\s*(\d{2})\.(\d{2})\.(\d{2})").unwrap());

/// Row-spans from earlier rows still covering columns of the current row.
/// Sparse: column → rows still to cover.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    pending: BTreeMap<usize, usize>,
}

impl Occupancy {
    pub fn new() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    /// Rows this column stays covered for, if any.
    pub fn pending(&self, col: usize) -> Option<usize> {
        self.pending.get(&col).copied()
    }

    /// Use up one row of coverage at `col`. Returns false if nothing was pending.
    fn consume(&mut self, col: usize) -> bool {
        match self.pending.get_mut(&col) {
            Some(n) if *n > 1 => { *n -= 1; true }
            Some(_) => { self.pending.remove(&col); true }
            None => false,
        }
    }

    /// Mark `cols` as covered for the next `rows` rows (overwrites).
    fn reserve(&mut self, cols: Range<usize>, rows: usize) {
        for c in cols {
            self.pending.insert(c, rows);
        }
    }
}

/// Days found in a header row, plus what the row told us about the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    pub days: Vec<Day>,
    /// Total columns, i.e. the sum of every header cell's colspan.
    pub width: usize,
    /// Day-header cells whose text had no date: (first column, text).
    pub unrecognized: Vec<(usize, String)>,
}

/// Parse a day-header text into (weekday, short date, date).
/// Impossible dates (31.02.) are rejected like non-matching text.
pub fn parse_day_header(text: &str) -> Option<(String, String, NaiveDate)> {
    let text = text_of(text);
    let caps = DAY_HEADER.captures(&text)?;
    let (dd, mm, yy) = (&caps[2], &caps[3], &caps[4]);

    let year = CENTURY + yy.parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, mm.parse().ok()?, dd.parse().ok()?)?;
    Some((s!(&caps[1]), format!("{dd}.{mm}.{yy}"), date))
}

/// Lay out the header row: every day-header cell with a date becomes a
/// [`Day`] claiming `[cursor, cursor + colspan)`. Every cell advances the
/// cursor, dated or not, so ranges are disjoint and increasing.
pub fn layout_header_row(cells: &[Cell]) -> HeaderLayout {
    let mut out = HeaderLayout::default();
    let mut col = 0usize;

    for cell in cells {
        let span = col..col + cell.colspan;
        if cell.role == CellRole::DayHeader {
            match parse_day_header(&cell.text) {
                Some((weekday, short_date, date)) => out.days.push(Day {
                    weekday,
                    short_date,
                    date,
                    columns: span.clone(),
                    lectures: Vec::new(),
                }),
                None => out.unrecognized.push((col, text_of(&cell.text))),
            }
        }
        col = span.end;
    }
    out.width = col;
    out
}

/// Place one data row's cells on the grid.
///
/// Columns still covered by a span from above are skipped without taking a
/// cell, using up one row of that coverage. Cells with `rowspan > 1` cover
/// their columns for the following rows. If the row ends while covered
/// columns remain to its right, those columns are spent for this row too.
/// A walk that only spends the columns it passes keeps such spans alive one
/// row longer per short row and shifts the next full row to the right.
pub fn advance_row<'a>(occ: &mut Occupancy, row: &'a [Cell]) -> Vec<(usize, &'a Cell)> {
    let mut placed = Vec::with_capacity(row.len());
    let mut col = 0usize;

    for cell in row {
        while occ.consume(col) {
            col += 1;
        }
        placed.push((col, cell));
        let span = col..col + cell.colspan;
        if cell.rowspan > 1 {
            occ.reserve(span.clone(), cell.rowspan - 1);
        }
        col = span.end;
    }

    // Short row: covered columns right of the last cell belong to this row as well.
    let trailing: Vec<usize> = occ.pending.range(col..).map(|(&c, _)| c).collect();
    for c in trailing {
        occ.consume(c);
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(placed: &[(usize, &Cell)]) -> Vec<usize> {
        placed.iter().map(|(c, _)| *c).collect()
    }

    #[test]
    fn day_header_grammar() {
        let (wd, short, date) = parse_day_header("Mo, 27.10.25").unwrap();
        assert_eq!(wd, "Mo");
        assert_eq!(short, "27.10.25");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 27).unwrap());

        assert!(parse_day_header("Di,28.10.25").is_some());
        assert!(parse_day_header("<b>Mi,</b>&nbsp;29.10.25").is_some());
        assert!(parse_day_header("Zeit").is_none());
        assert!(parse_day_header("Mo 27.10.25").is_none());
        assert!(parse_day_header("Fr, 31.02.25").is_none());
    }

    #[test]
    fn header_ranges_follow_colspans() {
        let row = vec![
            Cell::plain("Zeit"),
            Cell::day("Mo, 27.10.25").span(1, 2),
            Cell::day("Feiertag").span(1, 1),
            Cell::day("Mi, 29.10.25").span(1, 3),
        ];
        let layout = layout_header_row(&row);
        assert_eq!(layout.width, 7);
        assert_eq!(layout.days.len(), 2);
        assert_eq!(layout.days[0].columns, 1..3);
        assert_eq!(layout.days[1].columns, 4..7);
        assert_eq!(layout.unrecognized, vec![(3, s!("Feiertag"))]);
    }

    #[test]
    fn rowspan_blocks_next_row_only() {
        let mut occ = Occupancy::new();
        let r1 = vec![Cell::plain("a"), Cell::lecture("b").span(2, 2), Cell::plain("c")];
        let r2 = vec![Cell::plain("d"), Cell::plain("e")];
        let r3 = vec![Cell::plain("f"), Cell::plain("g"), Cell::plain("h"), Cell::plain("i")];

        assert_eq!(cols(&advance_row(&mut occ, &r1)), vec![0, 1, 3]);
        assert_eq!(occ.pending(1), Some(1));
        assert_eq!(occ.pending(2), Some(1));

        // columns 1..3 are covered: "e" lands at 3
        assert_eq!(cols(&advance_row(&mut occ, &r2)), vec![0, 3]);
        assert!(occ.is_empty());

        assert_eq!(cols(&advance_row(&mut occ, &r3)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn long_rowspan_counts_down() {
        let mut occ = Occupancy::new();
        advance_row(&mut occ, &[Cell::lecture("x").span(3, 1), Cell::plain("y")]);
        assert_eq!(occ.pending(0), Some(2));
        let row = [Cell::plain("z")];
        let placed = advance_row(&mut occ, &row);
        assert_eq!(cols(&placed), vec![1]);
        assert_eq!(occ.pending(0), Some(1));
        advance_row(&mut occ, &[Cell::plain("z")]);
        assert!(occ.is_empty());
    }

    #[test]
    fn trailing_span_expires_on_short_rows() {
        let mut occ = Occupancy::new();
        advance_row(&mut occ, &[Cell::plain("a"), Cell::lecture("b").span(2, 1)]);
        // row 2 ends before column 1
        assert_eq!(cols(&advance_row(&mut occ, &[Cell::plain("c")])), vec![0]);
        assert!(occ.is_empty());
        // row 3 is full width again
        assert_eq!(cols(&advance_row(&mut occ, &[Cell::plain("d"), Cell::plain("e")])), vec![0, 1]);
    }

    #[test]
    fn span_registered_by_short_row_survives_it() {
        let mut occ = Occupancy::new();
        advance_row(&mut occ, &[Cell::lecture("a").span(2, 1)]);
        assert_eq!(occ.pending(0), Some(1));
    }

    #[test]
    fn span_beyond_header_width_is_tolerated() {
        let mut occ = Occupancy::new();
        let row = [Cell::plain("a").span(2, 40), Cell::lecture("b")];
        let placed = advance_row(&mut occ, &row);
        assert_eq!(cols(&placed), vec![0, 40]);
        assert_eq!(occ.pending(39), Some(1));
    }

    #[test]
    fn no_two_cells_share_a_column() {
        let rows = vec![
            vec![Cell::plain("t"), Cell::lecture("a").span(3, 1), Cell::lecture("b").span(2, 2)],
            vec![Cell::plain("t"), Cell::lecture("c")],
            vec![Cell::plain("t"), Cell::lecture("d"), Cell::lecture("e")],
            vec![Cell::plain("t"), Cell::lecture("f").span(1, 2), Cell::lecture("g")],
        ];
        let mut occ = Occupancy::new();
        for row in &rows {
            let placed = cols(&advance_row(&mut occ, row));
            let mut uniq = placed.clone();
            uniq.dedup();
            assert_eq!(uniq, placed);
            assert!(placed.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
