//! G-Code Optimizer
//!
//! Removes redundant lines from an emitted program.

use tracing::debug;

/// G-code optimization strategies
#[derive(Debug)]
pub struct GcodeOptimizer;

impl GcodeOptimizer {
    /// Collapse runs of byte-identical consecutive lines into one.
    ///
    /// Repeats that are not adjacent are kept.
    pub fn collapse_adjacent_duplicates(lines: &[String]) -> Vec<String> {
        let mut result: Vec<String> = Vec::with_capacity(lines.len());

        for line in lines {
            if result.last() != Some(line) {
                result.push(line.clone());
            }
        }

        if result.len() < lines.len() {
            debug!(
                "Collapsed {} repeated lines",
                lines.len() - result.len()
            );
        }
        result
    }

    /// Count pen lifts in a program
    pub fn count_pen_lifts(lines: &[String]) -> usize {
        lines
            .iter()
            .filter(|line| line.trim_end().ends_with("; pen up"))
            .count()
    }
}
