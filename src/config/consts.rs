// src/config/consts.rs

// Net config
pub const OVERVIEW_URL: &str =
    "https://business.thws.de/studierende/vorlesungs-und-belegungsplaene/";
pub const USER_AGENT: &str = concat!("plan_scrape/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 15;

// Plan markup
pub const WEEK_HEADING_CLASS: &str = "w2";
pub const DAY_HEADER_CLASS: &str = "t";
pub const LECTURE_CLASS: &str = "v";

// Overview markup
pub const PROGRAM_SECTION_CLASS: &str = "accordion";

// Lecture text
pub const NOTE_SEP: &str = " / ";
pub const LECTURE_FIELD_LINES: usize = 5;

// Two-digit years on the plan are 20YY.
pub const CENTURY: i32 = 2000;

// Query
pub const DEFAULT_DAYS: u32 = 7;

// Report
pub const RULE_WIDTH: usize = 80;
