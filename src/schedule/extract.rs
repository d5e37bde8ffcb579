// src/schedule/extract.rs
//! Week grid → Days with their Lectures.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::consts::{LECTURE_FIELD_LINES, NOTE_SEP};
use crate::core::html::{breaks_to_newlines, strip_tags, text_of};
use crate::core::sanitize::decode_entities;
use super::diagnostics::{DropReason, DropSink, Dropped, NullSink};
use super::grid::{advance_row, layout_header_row, Occupancy};
use super::types::{CellRole, ClockTime, Day, Lecture, Row};

static TIME_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})\s*-\s*(\d{1,2}):(\d{2})").unwrap());

/// Parse one week grid. The first row is the day header row.
/// A grid without at least one row under the header has no Days.
/// Cells that don't yield a Day or Lecture are skipped silently.
pub fn parse_week(rows: &[Row]) -> Vec<Day> {
    parse_week_with(rows, &mut NullSink)
}

/// Like [`parse_week`], reporting every skipped cell to `sink`.
pub fn parse_week_with(rows: &[Row], sink: &mut dyn DropSink) -> Vec<Day> {
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };
    if body.is_empty() {
        return Vec::new();
    }

    let layout = layout_header_row(header);
    for (col, text) in layout.unrecognized {
        sink.dropped(Dropped { row: 0, col, reason: DropReason::UnrecognizedHeader, text });
    }
    let mut days = layout.days;

    let mut occ = Occupancy::new();
    for (i, row) in body.iter().enumerate() {
        let row_no = i + 1;
        for (col, cell) in advance_row(&mut occ, row) {
            if cell.role != CellRole::Lecture {
                continue;
            }
            let skip = |reason| Dropped { row: row_no, col, reason, text: preview(&cell.text) };

            let Some(day) = days.iter_mut().find(|d| d.covers(col)) else {
                sink.dropped(skip(DropReason::Unroutable));
                continue;
            };
            match lecture_from_text(&cell.text) {
                Ok(mut lecture) => {
                    lecture.id = cell.id.clone();
                    day.lectures.push(lecture);
                }
                Err(reason) => sink.dropped(skip(reason)),
            }
        }
    }
    days
}

/// Parse a lecture cell's text. `None` unless start, end and subject are all present.
pub fn parse_lecture_text(raw: &str) -> Option<Lecture> {
    lecture_from_text(raw).ok()
}

/// Lecture cell layout, one field per line:
///
/// ```text
/// [note lines...]
/// 10:00 - 11:30
/// subject
/// title
/// session type
/// instructor
/// room
/// [ignored...]
/// ```
pub fn lecture_from_text(raw: &str) -> Result<Lecture, DropReason> {
    let text = normalize_cell_text(raw);
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let (at, caps) = lines
        .iter()
        .enumerate()
        .find_map(|(i, l)| TIME_RANGE.captures(l).map(|c| (i, c)))
        .ok_or(DropReason::NoTimeRange)?;

    // Non-ASCII digits match `\d` but are not a time.
    let start = ClockTime::from_digits(&caps[1], &caps[2]).ok_or(DropReason::NoTimeRange)?;
    let end = ClockTime::from_digits(&caps[3], &caps[4]).ok_or(DropReason::NoTimeRange)?;

    let note = (at > 0).then(|| lines[..at].join(NOTE_SEP));

    let rest = &lines[at + 1..];
    if rest.len() < LECTURE_FIELD_LINES {
        return Err(DropReason::MissingFields);
    }

    Ok(Lecture {
        id: None,
        note,
        start,
        end,
        subject: s!(rest[0]),
        title: s!(rest[1]),
        session_type: s!(rest[2]),
        instructor: s!(rest[3]),
        room: s!(rest[4]),
    })
}

/// `<br>` → newline, tags out, entities decoded, trimmed.
fn normalize_cell_text(raw: &str) -> String {
    decode_entities(&strip_tags(&breaks_to_newlines(raw))).trim().to_string()
}

fn preview(raw: &str) -> String {
    text_of(&breaks_to_newlines(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::diagnostics::DropLog;
    use crate::schedule::types::Cell;

    fn t(h: u8, m: u8) -> ClockTime {
        ClockTime::new(h, m)
    }

    #[test]
    fn fields_after_time_line() {
        let lec = parse_lecture_text("10:00-11:30\nMath\nCalc I\nLecture\nDr. X\nRoom 1").unwrap();
        assert_eq!(lec.start, t(10, 0));
        assert_eq!(lec.end, t(11, 30));
        assert_eq!(lec.subject, "Math");
        assert_eq!(lec.title, "Calc I");
        assert_eq!(lec.session_type, "Lecture");
        assert_eq!(lec.instructor, "Dr. X");
        assert_eq!(lec.room, "Room 1");
        assert_eq!(lec.note, None);
        assert_eq!(lec.id, None);
    }

    #[test]
    fn lines_before_time_become_note() {
        let lec = parse_lecture_text("Room change\n09:00-10:00\nBio\nIntro\nLab\nDr. Y\nRoom 2").unwrap();
        assert_eq!(lec.note.as_deref(), Some("Room change"));
        assert_eq!(lec.start, t(9, 0));
        assert_eq!(lec.subject, "Bio");
        assert_eq!(lec.room, "Room 2");

        let lec = parse_lecture_text("Entfällt\nnur Gr. A\n8:15 - 9:45\nS\nT\nV\nD\nR").unwrap();
        assert_eq!(lec.note.as_deref(), Some("Entfällt / nur Gr. A"));
        assert_eq!(lec.start, t(8, 15));
    }

    #[test]
    fn markup_breaks_and_entities() {
        let raw = "  <b>08:15 &#8211; x</b><br/>08:15 - 09:45<br>Marketing<br />Grundlagen &amp; Praxis<br>V<br>Prof. M&uuml;ller<br>H.1.2  ";
        let lec = parse_lecture_text(raw).unwrap();
        assert_eq!(lec.note.as_deref(), Some("08:15 – x"));
        assert_eq!(lec.title, "Grundlagen & Praxis");
        assert_eq!(lec.instructor, "Prof. Müller");
        assert_eq!(lec.room, "H.1.2");
    }

    #[test]
    fn blank_lines_are_skipped_and_extras_ignored() {
        let lec = parse_lecture_text("\n\n10:00 -11:30\n\n Math \nCalc\nÜ\nX\nR1\nextra\nmore").unwrap();
        assert_eq!(lec.subject, "Math");
        assert_eq!(lec.room, "R1");
    }

    #[test]
    fn rejects_incomplete_text() {
        assert_eq!(lecture_from_text("Math\nCalc I"), Err(DropReason::NoTimeRange));
        assert_eq!(lecture_from_text(""), Err(DropReason::NoTimeRange));
        assert_eq!(lecture_from_text("10:00-11:30\nMath\nCalc I\nLecture\nDr. X"), Err(DropReason::MissingFields));
        assert_eq!(lecture_from_text("١٠:٠٠-١١:٣٠\nA\nB\nC\nD\nE"), Err(DropReason::NoTimeRange));
    }

    #[test]
    fn first_time_line_wins() {
        let lec = parse_lecture_text("10:00-11:30\n12:00-13:00\nB\nC\nD\nE").unwrap();
        assert_eq!(lec.start, t(10, 0));
        assert_eq!(lec.subject, "12:00-13:00");
    }

    fn week() -> Vec<Row> {
        vec![
            vec![
                Cell::plain("Zeit"),
                Cell::day("Mo, 27.10.25").span(1, 2),
                Cell::day("Di, 28.10.25"),
            ],
            vec![
                Cell::plain("08:15"),
                Cell::lecture("08:15-09:45\nA\nA1\nV\nP1\nR1").span(2, 1).with_id("a"),
                Cell::lecture("08:15-09:45\nB\nB1\nÜ\nP2\nR2"),
                Cell::lecture("08:15-11:30\nC\nC1\nS\nP3\nR3").span(3, 1),
            ],
            vec![
                Cell::plain("09:00"),
                Cell::plain(""),
            ],
            vec![
                Cell::plain("10:00"),
                Cell::lecture("10:00-11:30\nD\nD1\nV\nP4\nR4").span(1, 2),
            ],
        ]
    }

    #[test]
    fn routes_cells_past_rowspans() {
        let days = parse_week(&week());
        assert_eq!(days.len(), 2);
        let mo: Vec<&str> = days[0].lectures.iter().map(|l| l.subject.as_str()).collect();
        let di: Vec<&str> = days[1].lectures.iter().map(|l| l.subject.as_str()).collect();
        assert_eq!(mo, vec!["A", "B", "D"]);
        assert_eq!(di, vec!["C"]);
        assert_eq!(days[0].lectures[0].id.as_deref(), Some("a"));
    }

    #[test]
    fn walk_order_matches_start_time_order() {
        for day in parse_week(&week()) {
            let starts: Vec<ClockTime> = day.lectures.iter().map(|l| l.start).collect();
            let mut sorted = starts.clone();
            sorted.sort();
            assert_eq!(starts, sorted);
        }
    }

    #[test]
    fn drops_are_reported() {
        let mut rows = week();
        rows[0].push(Cell::day("Ferien"));
        rows.push(vec![
            Cell::plain("12:00").span(1, 50),
            Cell::lecture("12:00-13:00\nX\nX\nX\nX\nX"),
        ]);
        rows.push(vec![Cell::plain("13:00"), Cell::lecture("abgesagt")]);

        let mut log = DropLog::default();
        let days = parse_week_with(&rows, &mut log);
        assert_eq!(days.iter().map(|d| d.lectures.len()).sum::<usize>(), 4);

        let reasons: Vec<(usize, usize, DropReason)> =
            log.0.iter().map(|d| (d.row, d.col, d.reason.clone())).collect();
        assert_eq!(
            reasons,
            vec![
                (0, 4, DropReason::UnrecognizedHeader),
                (4, 50, DropReason::Unroutable),
                (5, 1, DropReason::NoTimeRange),
            ]
        );
        assert_eq!(log.0[2].text, "abgesagt");
    }

    #[test]
    fn header_only_and_empty_grids() {
        assert!(parse_week(&[]).is_empty());
        assert!(parse_week(&[vec![Cell::day("Mo, 27.10.25")]]).is_empty());

        let days = parse_week(&[vec![Cell::day("Mo, 27.10.25")], vec![Cell::plain("08:00")]]);
        assert_eq!(days.len(), 1);
        assert!(days[0].lectures.is_empty());
    }

    #[test]
    fn times_are_kept_as_printed() {
        let lec = parse_lecture_text("18:00-24:00\nA\nB\nC\nD\nE").unwrap();
        assert_eq!((lec.start, lec.end), (t(18, 0), t(24, 0)));
        assert_eq!(lec.end.to_string(), "24:00");

        let lec = parse_lecture_text("25:00-26:30\nA\nB\nC\nD\nE").unwrap();
        assert_eq!(lec.start, t(25, 0));
        assert_eq!(lec.subject, "A");
    }
}
