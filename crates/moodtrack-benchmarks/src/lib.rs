#![warn(missing_docs)]
//! # moodtrack-benchmarks
//!
//! Deterministic workloads for the decode -> apply -> render smoke test.

use moodtrack_core::{CoreError, Entry, Happiness, Timestamp};

/// Builds `count` entries with timestamps one minute apart and cycling scores.
///
/// # Errors
/// Returns [`CoreError`] if a generated score falls outside the valid range.
pub fn synthetic_entries(count: usize) -> Result<Vec<Entry>, CoreError> {
    (0..count)
        .map(|index| {
            let score = (index % 10) as i64 + 1;
            Ok(Entry {
                timestamp: Timestamp::new(format!(
                    "2024-{:02}-{:02}T{:02}:{:02}:00",
                    index / (28 * 24 * 60) % 12 + 1,
                    index / (24 * 60) % 28 + 1,
                    index / 60 % 24,
                    index % 60
                )),
                highlight: format!("highlight {index}"),
                lowlight: format!("lowlight {index}"),
                happiness: Happiness::new(score)?,
                major_event: String::new(),
            })
        })
        .collect()
}
