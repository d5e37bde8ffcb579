// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific readers for the timetable site. Each spec knows *where the
//! ground truth lives in the HTML* for one kind of page and nothing else.
//!
//! ## What lives here
//! - `catalog` – the overview page: programs, semesters and the plan links
//!   filed under each.
//! - `plan` – one plan document: `div.w2` week headings, each followed by a
//!   table whose `<td>`s become [`crate::schedule::Cell`]s.
//!
//! ## What does **not** live here
//! - The rowspan/colspan walk and lecture text parsing (`schedule`).
//! - Date windows, sorting and output (`runner`, `report`).
//!
//! ## Typical call chain
//! ```text
//! cli → runner::schedule → specs::catalog::fetch → Catalog::lookup
//!                        ↘ specs::plan::fetch → schedule::parse_week (per table)
//! ```
//!
//! ## Conventions
//! - **Case-insensitive** tag detection via `core::html`; no full-document regexes.
//! - Scan locally within known blocks (`<table>…</table>`, `<td class="v">…`).
//! - Every spec has a pure `parse_doc` next to its `fetch` so tests run offline.
pub mod catalog;
pub mod plan;
