// src/error.rs
use thiserror::Error;

/// Failures of the outer layers (fetch, lookup, output).
/// The grid parser itself never fails; see `schedule::diagnostics`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("course '{course}' not found; available: {}", available.join(", "))]
    UnknownCourse { course: String, available: Vec<String> },

    #[error("semester {semester} not found for {course}; available: {}", join_nums(available))]
    UnknownSemester { course: String, semester: u32, available: Vec<u32> },

    #[error("no plan document listed for {course} semester {semester}")]
    NoPlan { course: String, semester: u32 },
}

fn join_nums(v: &[u32]) -> String {
    v.iter().map(u32::to_string).collect::<Vec<_>>().join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
