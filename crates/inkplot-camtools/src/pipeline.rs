//! Toolpath pipeline
//!
//! Threads one [`Document`] through every stage in a fixed order:
//!
//! 1. resolve transforms
//! 2. dedupe, optional compound split, drop empty paths
//! 3. pre-sort by centroid (y, x)
//! 4. normalize to the origin
//! 5. tiny-path filter, then normalize again
//! 6. scale
//! 7. serpentine ordering
//! 8. emission and adjacent-duplicate collapse

use inkplot_core::{Document, Point, ToolpathError};
use inkplot_settings::ToolpathConfig;
use serde::Serialize;
use tracing::{debug, info};

use crate::curation::{self, PathCurator};
use crate::error::CamToolResult;
use crate::gcode_gen::{GcodeCommand, GcodeProgram, ToolpathEmitter};
use crate::optimizer::GcodeOptimizer;
use crate::ordering::PathOrderer;
use crate::transform::TransformResolver;

/// Counters collected while running the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolpathStats {
    pub input_paths: usize,
    pub duplicates_removed: usize,
    /// Extra paths created by compound splitting
    pub paths_split: usize,
    pub empty_removed: usize,
    pub tiny_removed: usize,
    pub final_paths: usize,
    pub rows: usize,
    pub pen_lifts: usize,
    pub emitted_lines: usize,
    /// Pen-down travel over the emitted moves (mm)
    pub draw_distance: f64,
    /// Pen-up travel between paths (mm)
    pub travel_distance: f64,
}

impl ToolpathStats {
    /// Measures pen-down and pen-up distance over an emitted command list.
    /// Distance starts at the first planar move.
    pub fn measure_commands(&mut self, commands: &[GcodeCommand]) {
        let mut position: Option<Point> = None;
        let (mut draw, mut travel) = (0.0, 0.0);
        for command in commands {
            let Some(target) = command.target() else {
                continue;
            };
            if let Some(from) = position {
                match command {
                    GcodeCommand::Draw { .. } => draw += from.distance_to(&target),
                    _ => travel += from.distance_to(&target),
                }
            }
            position = Some(target);
        }
        self.draw_distance = draw;
        self.travel_distance = travel;
    }
}

impl std::fmt::Display for ToolpathStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} paths in {} rows ({} in, {} duplicates, {} split, {} tiny), {} lines, draw {:.1}mm, travel {:.1}mm",
            self.final_paths,
            self.rows,
            self.input_paths,
            self.duplicates_removed,
            self.paths_split,
            self.tiny_removed,
            self.emitted_lines,
            self.draw_distance,
            self.travel_distance
        )
    }
}

/// Output of a pipeline run
#[derive(Debug, Clone)]
pub struct ToolpathOutput {
    /// Final document in visiting order, scaled
    pub document: Document,
    /// Emitted commands before duplicate collapse
    pub commands: Vec<GcodeCommand>,
    pub program: GcodeProgram,
    pub stats: ToolpathStats,
}

/// The full vector-to-G-code pipeline for one configuration
#[derive(Debug, Clone)]
pub struct ToolpathPipeline {
    config: ToolpathConfig,
}

impl ToolpathPipeline {
    /// Validates the configuration and builds a pipeline.
    pub fn new(config: ToolpathConfig) -> CamToolResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ToolpathConfig {
        &self.config
    }

    /// Runs every stage up to and including ordering.
    ///
    /// Returns the scaled document in visiting order.
    pub fn prepare(&self, document: Document) -> CamToolResult<(Document, ToolpathStats)> {
        let mut stats = ToolpathStats {
            input_paths: document.len(),
            ..ToolpathStats::default()
        };

        let resolver = TransformResolver::from_paths(&document.paths, self.config.transform_policy);
        let document = resolver.apply(document)?;

        let curator = PathCurator::new(&self.config);
        let count = document.len();
        let document = curator.dedupe(document);
        stats.duplicates_removed = count - document.len();

        let count = document.len();
        let document = curator.split(document);
        stats.paths_split = document.len() - count;

        let count = document.len();
        let document = curator.drop_empty(document);
        stats.empty_removed = count - document.len();

        if document.is_empty() {
            return Err(ToolpathError::empty("no paths left after curation").into());
        }

        let document = PathOrderer::presort(document);
        let document = curation::normalize(document)?;

        let count = document.len();
        let document = curator.filter_tiny(document);
        stats.tiny_removed = count - document.len();

        if document.is_empty() {
            return Err(ToolpathError::empty("every path is below the minimum size").into());
        }

        // The filter may have removed the path that touched an axis
        let document = curation::normalize(document)?;
        let document = curation::scale(document, self.config.scale_factor);

        let (document, rows) = PathOrderer::new(&self.config).order(document);
        stats.rows = rows;
        stats.final_paths = document.len();
        debug!(
            "Prepared {} paths ({} rows) at scale {}",
            stats.final_paths, rows, self.config.scale_factor
        );

        Ok((document, stats))
    }

    /// Runs the whole pipeline.
    pub fn run(&self, document: Document) -> CamToolResult<ToolpathOutput> {
        let (document, mut stats) = self.prepare(document)?;

        let commands = ToolpathEmitter::new(&self.config).emit(&document.paths);
        let program = GcodeProgram::from_commands(&commands);

        stats.measure_commands(&commands);
        stats.pen_lifts = GcodeOptimizer::count_pen_lifts(program.lines());
        stats.emitted_lines = program.len();
        info!("Generated toolpath: {}", stats);

        Ok(ToolpathOutput {
            document,
            commands,
            program,
            stats,
        })
    }
}
