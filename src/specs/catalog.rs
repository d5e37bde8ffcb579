// src/specs/catalog.rs
//! Scraping *spec* for the plan overview page.
//!
//! Purpose:
//! - Parse the overview page and list every program with its semesters and
//!   the plan documents linked for each.
//!
//! Page shape:
//! - One `div.accordion` per program, headed `<h2|h3>Bachelor Business Analytics (BBA)</h2>`.
//! - Inside, tables whose rows read `| 6./7. Semester | <a href="…/BBA%207%20WS%2025_26.html">Gr. A</a> … |`.
//!
//! A row listing several semesters files its links under each of them.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::consts::PROGRAM_SECTION_CLASS;
use crate::core::{html, net};
use crate::core::html::{attr_value, blocks, inner_after_open_tag, text_of};
use crate::error::{Error, Result};

static PROGRAM_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Bachelor|Master)\s+([^(]+)\s*\(([^)]+)\)").unwrap());
static SEMESTER_NO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\.").unwrap());
static TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(WS|SS)\s+(\d{2})_(\d{2})").unwrap());
static GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"Gr\.\s*([A-D])").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Season {
    Winter,
    Summer,
}

/// A semester term as encoded in plan filenames, e.g. "WS 25_26".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Term {
    pub season: Season,
    /// Two-digit years as printed: (25, 26) for WS 25/26.
    pub years: (u8, u8),
}

impl Term {
    pub fn abbrev(&self) -> &'static str {
        match self.season { Season::Winter => "WS", Season::Summer => "SS" }
    }

    /// "Wintersemester (WS) 25/26"
    pub fn long(&self) -> String {
        let name = match self.season {
            Season::Winter => "Wintersemester",
            Season::Summer => "Sommersemester",
        };
        format!("{name} ({}) {:02}/{:02}", self.abbrev(), self.years.0, self.years.1)
    }

    /// Find a term in a (percent-decoded) filename.
    pub fn from_filename(name: &str) -> Option<Term> {
        let caps = TERM.captures(name)?;
        let season = if &caps[1] == "WS" { Season::Winter } else { Season::Summer };
        Some(Term { season, years: (caps[2].parse().ok()?, caps[3].parse().ok()?) })
    }
}

/// "WS 25/26"
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}/{:02}", self.abbrev(), self.years.0, self.years.1)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleLink {
    pub url: String,
    pub term: Option<Term>,
    /// Study group letter from link text "Gr. A".
    pub group: Option<char>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Program {
    /// "BBA"
    pub abbreviation: String,
    /// "Bachelor Business Analytics"
    pub name: String,
    pub semesters: BTreeMap<u32, Vec<ScheduleLink>>,
}

/// Programs keyed by abbreviation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub programs: BTreeMap<String, Program>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool { self.programs.is_empty() }

    /// Case-insensitive lookup by abbreviation.
    pub fn program(&self, course: &str) -> Option<&Program> {
        self.programs.get(&course.trim().to_ascii_uppercase())
    }

    /// The default plan for a course/semester: the first link listed.
    pub fn lookup(&self, course: &str, semester: u32) -> Result<(&Program, &ScheduleLink)> {
        let course = course.trim().to_ascii_uppercase();
        let program = self.program(&course).ok_or_else(|| Error::UnknownCourse {
            course: course.clone(),
            available: self.programs.keys().cloned().collect(),
        })?;
        let links = program.semesters.get(&semester).ok_or_else(|| Error::UnknownSemester {
            course: course.clone(),
            semester,
            available: program.semesters.keys().copied().collect(),
        })?;
        let link = links.first().ok_or(Error::NoPlan { course, semester })?;
        Ok((program, link))
    }
}

/// Download and parse the overview page.
pub fn fetch(overview_url: &str) -> Result<Catalog> {
    let doc = net::http_get(overview_url)?;
    let catalog = parse_doc(&doc, origin_of(overview_url));
    if catalog.is_empty() {
        warn!("Catalog: no program sections found on {overview_url}");
    } else {
        info!("Catalog: {} programs", catalog.programs.len());
    }
    Ok(catalog)
}

/// `https://host/a/b` → `https://host`
pub fn origin_of(url: &str) -> &str {
    let after_scheme = url.find("://").map_or(0, |i| i + 3);
    match url[after_scheme..].find('/') {
        Some(i) => &url[..after_scheme + i],
        None => url,
    }
}

/// Split out for unit tests. `origin` resolves relative links.
pub fn parse_doc(doc: &str, origin: &str) -> Catalog {
    let mut catalog = Catalog::default();
    let sections = html::openers_with_class(doc, "<div", PROGRAM_SECTION_CLASS);

    for (i, &at) in sections.iter().enumerate() {
        let end = sections.get(i + 1).copied().unwrap_or(doc.len());
        let section = &doc[at..end];

        let Some((abbreviation, name)) = program_heading(section) else {
            debug!("Catalog: section without program heading, skipped");
            continue;
        };
        let mut semesters = BTreeMap::new();
        for (_, table) in blocks(section, "<table", "</table>") {
            read_semester_table(table, origin, &mut semesters);
        }
        if semesters.is_empty() {
            debug!("Catalog: {abbreviation} lists no plans, skipped");
            continue;
        }

        let program = catalog
            .programs
            .entry(abbreviation.clone())
            .or_insert_with(|| Program { abbreviation, name, semesters: BTreeMap::new() });
        for (sem, links) in semesters {
            program.semesters.entry(sem).or_default().extend(links);
        }
    }
    catalog
}

/// First `<h2>`/`<h3>` of the section → (abbreviation, "Bachelor Name").
fn program_heading(section: &str) -> Option<(String, String)> {
    let h2 = blocks(section, "<h2", "</h2>").next();
    let h3 = blocks(section, "<h3", "</h3>").next();
    let (_, heading) = match (h2, h3) {
        (Some(a), Some(b)) => if a.0 <= b.0 { a } else { b },
        (a, b) => a.or(b)?,
    };
    let text = text_of(inner_after_open_tag(heading));
    let caps = PROGRAM_HEADING.captures(&text)?;
    Some((s!(caps[3].trim()), format!("{} {}", &caps[1], caps[2].trim())))
}

/// Rows after the first: semester cell, link cell.
fn read_semester_table(table: &str, origin: &str, out: &mut BTreeMap<u32, Vec<ScheduleLink>>) {
    for (_, tr) in blocks(table, "<tr", "</tr>").skip(1) {
        let tds: Vec<&str> = blocks(tr, "<td", "</td>").map(|(_, td)| td).collect();
        if tds.len() < 2 {
            continue;
        }

        let semester_text = text_of(inner_after_open_tag(tds[0]));
        let semesters: Vec<u32> = SEMESTER_NO
            .captures_iter(&semester_text)
            .filter_map(|c| c[1].parse().ok())
            .collect();
        if semesters.is_empty() {
            continue;
        }

        for (_, a) in blocks(inner_after_open_tag(tds[1]), "<a", "</a>") {
            let Some(link) = read_link(a, origin) else { continue };
            for &sem in &semesters {
                out.entry(sem).or_default().push(link.clone());
            }
        }
    }
}

/// `<a href="…x.html">Gr. B</a>` → link; anything not pointing at `.html` is ignored.
fn read_link(a: &str, origin: &str) -> Option<ScheduleLink> {
    let href = attr_value(html::opener(a), "href")?.trim();
    if !href.contains(".html") {
        return None;
    }

    let url = if href.starts_with("http") {
        s!(href)
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    };

    let raw_name = href.rsplit('/').next().unwrap_or(href);
    let filename = urlencoding::decode(raw_name).map_or_else(|_| s!(raw_name), |c| c.into_owned());
    let group = GROUP
        .captures(&text_of(inner_after_open_tag(a)))
        .and_then(|c| c[1].chars().next());

    Some(ScheduleLink { url, term: Term::from_filename(&filename), group })
}
