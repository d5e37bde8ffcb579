// src/schedule/mod.rs
//! # Schedule core
//!
//! Turns one plan table (a "week grid") into typed [`Day`]s and [`Lecture`]s.
//! Pure and synchronous: no I/O, no state kept between calls. Weeks can be
//! parsed independently and in any order.
//!
//! ## Pipeline
//! ```text
//! rows of Cells ──▶ grid::layout_header_row ──▶ Days with column ranges
//!              └──▶ grid::advance_row (per row) ──▶ (column, cell)
//!                       └──▶ extract: route by column, parse text ──▶ Day.lectures
//! ```
//!
//! ## Conventions
//! - Cells come from `specs::plan` (or tests) with role, spans and raw markup.
//! - Anything that doesn't fit (undated headers, cells outside every day,
//!   incomplete lecture text) is skipped, never an error. Pass a
//!   [`DropSink`] to [`parse_week_with`] to see what was skipped.
//! - Lectures keep grid order (top to bottom, left to right). Callers that
//!   need time order sort explicitly (see `runner`).

pub mod diagnostics;
pub mod extract;
pub mod grid;
pub mod types;

pub use diagnostics::{DropLog, DropReason, DropSink, Dropped, LogSink, NullSink};
pub use extract::{lecture_from_text, parse_lecture_text, parse_week, parse_week_with};
pub use grid::{advance_row, layout_header_row, HeaderLayout, Occupancy};
pub use types::{Cell, CellRole, ClockTime, Day, Lecture, Row, Week};
