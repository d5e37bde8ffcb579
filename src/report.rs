// src/report.rs
// Plain-text and JSON rendering for the CLI.

use std::fmt::Write as _;

use serde::Serialize;

use crate::config::consts::RULE_WIDTH;
use crate::error::Result;
use crate::runner::{Entry, ScheduleReport};
use crate::specs::catalog::Catalog;

const UNKNOWN_TERM: &str = "unknown term";

/// Programs and their semesters, one line per semester.
pub fn catalog_text(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return s!("No lecture plans found.\n");
    }

    let mut out = format!("AVAILABLE LECTURE PLANS\n{}\n\n", rule!('=', RULE_WIDTH));
    for program in catalog.programs.values() {
        let _ = writeln!(out, "\n{} ({}):", program.name, program.abbreviation);
        for (sem, links) in &program.semesters {
            let term = links
                .first()
                .and_then(|l| l.term)
                .map_or_else(|| s!(UNKNOWN_TERM), |t| t.long());
            let _ = writeln!(out, "  - Semester {sem} - {term}");
        }
    }
    out
}

/// Summary header followed by the lectures grouped under date headers.
pub fn schedule_text(r: &ScheduleReport) -> String {
    if r.entries.is_empty() {
        return format!(
            "No lectures found for {} semester {} between {} and {}.\n",
            r.course, r.semester, r.from, r.until
        );
    }

    let term = r.term.map_or_else(|| s!(UNKNOWN_TERM), |t| t.long());
    let mut out = format!(
        "LECTURE PLAN\n\
         Program: {} ({})\n\
         Semester: {}\n\
         Term: {}\n\
         Window: {} to {}\n\
         Found: {} lectures\n\n",
        r.program, r.course, r.semester, term, r.from, r.until, r.entries.len()
    );
    out.push_str(&entries_text(&r.entries));
    out
}

/// Date header whenever the date changes, then one block per lecture.
pub fn entries_text(entries: &[Entry]) -> String {
    let mut out = s!();
    let mut current = None;
    for e in entries {
        if current != Some(e.date) {
            current = Some(e.date);
            let hashes = rule!('#', RULE_WIDTH);
            let _ = write!(out, "\n{hashes}\n# {}, {}\n{hashes}\n", e.weekday, e.date);
        }
        out.push_str(&lecture_block(e));
    }
    out
}

fn lecture_block(e: &Entry) -> String {
    let l = &e.lecture;
    let equals = rule!('=', RULE_WIDTH);
    let mut out = format!(
        "\n{equals}\n\
         Date: {}, {}\n\
         Time: {} - {}\n\
         Subject: {}\n\
         Title: {}\n\
         Type: {}\n\
         Instructor: {}\n\
         Room: {}\n",
        e.weekday,
        e.date,
        l.start,
        l.end,
        l.subject,
        l.title,
        l.session_type,
        l.instructor,
        l.room,
    );
    if let Some(note) = &l.note {
        let _ = writeln!(out, "Note: {note}");
    }
    out.push_str(&equals);
    out.push('\n');
    out
}

/// Pretty JSON of anything serializable (reports, entries, days).
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::schedule::{ClockTime, Lecture};
    use crate::specs::catalog::parse_doc;

    fn entry(day: u32, h: u8, subject: &str, note: Option<&str>) -> Entry {
        Entry {
            date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
            weekday: s!(if day == 27 { "Mo" } else { "Di" }),
            lecture: Lecture {
                id: None,
                note: note.map(String::from),
                start: ClockTime::new(h, 15),
                end: ClockTime::new(h + 1, 45),
                subject: s!(subject),
                title: s!("Grundlagen"),
                session_type: s!("V"),
                instructor: s!("Prof. X"),
                room: s!("H.1.2"),
            },
        }
    }

    #[test]
    fn one_date_header_per_date() {
        let text = entries_text(&[
            entry(27, 8, "A", None),
            entry(27, 10, "B", Some("Raumänderung")),
            entry(28, 8, "C", None),
        ]);
        assert_eq!(text.matches("# Mo, 2025-10-27").count(), 1);
        assert_eq!(text.matches("# Di, 2025-10-28").count(), 1);
        assert!(text.contains("Time: 08:15 - 09:45\nSubject: A\n"));
        assert!(text.contains("Room: H.1.2\nNote: Raumänderung\n"));
        assert_eq!(text.matches("Note:").count(), 1);
        assert!(text.contains(&rule!('#', RULE_WIDTH)));
    }

    #[test]
    fn schedule_header_and_empty_message() {
        let mut r = ScheduleReport {
            course: s!("BBA"),
            program: s!("Bachelor Business Analytics"),
            semester: 7,
            term: None,
            url: s!("https://h/p.html"),
            from: NaiveDate::from_ymd_opt(2025, 10, 27).unwrap(),
            until: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            entries: vec![entry(27, 8, "A", None)],
        };
        let text = schedule_text(&r);
        assert!(text.starts_with("LECTURE PLAN\nProgram: Bachelor Business Analytics (BBA)\n"));
        assert!(text.contains("Term: unknown term\n"));
        assert!(text.contains("Window: 2025-10-27 to 2025-11-03\nFound: 1 lectures\n"));

        r.entries.clear();
        assert_eq!(
            schedule_text(&r),
            "No lectures found for BBA semester 7 between 2025-10-27 and 2025-11-03.\n"
        );
    }

    #[test]
    fn catalog_listing() {
        let doc = r#"
            <div class="accordion"><h2>Bachelor Business Analytics (BBA)</h2>
            <table><tr><th>Sem</th><th>Plan</th></tr>
            <tr><td>7. Semester</td><td><a href="/f/BBA%207%20WS%2025_26.html">Gr. A</a></td></tr>
            <tr><td>1. Semester</td><td><a href="/f/BBA%201.html">Plan</a></td></tr>
            </table></div>"#;
        let text = catalog_text(&parse_doc(doc, "https://h"));
        assert!(text.contains("\nBachelor Business Analytics (BBA):\n"));
        let one = text.find("  - Semester 1 - unknown term").unwrap();
        let seven = text.find("  - Semester 7 - Wintersemester (WS) 25/26").unwrap();
        assert!(one < seven);

        assert_eq!(catalog_text(&Catalog::default()), "No lecture plans found.\n");
    }

    #[test]
    fn json_uses_hhmm_and_iso_dates() {
        let json = to_json(&[entry(27, 8, "A", None)][..]).unwrap();
        assert!(json.contains(r#""date": "2025-10-27""#));
        assert!(json.contains(r#""start": "08:15""#));
        assert!(!json.contains("note"));
    }
}
