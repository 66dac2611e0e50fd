//! G-code generation for pen plotting.
//!
//! [`ToolpathEmitter`] flattens every segment of every path, in visiting
//! order, into sampled points and emits pen-up/pen-down motion records
//! between a fixed header and footer. [`GcodeProgram`] holds the finished
//! line list handed to the writer.

use std::fmt;
use std::path::Path as FsPath;

use inkplot_core::{Path, Point};
use inkplot_settings::ToolpathConfig;
use tracing::debug;

use crate::optimizer::GcodeOptimizer;

const INITIAL_SEQUENCE: &str = "------------Initial Sequence------------";
const END_SEQUENCE: &str = "------------End Sequence------------";

/// Extrusion amount of the priming move
const PRIME_EXTRUSION: f64 = 0.00001;

/// Formats a value to 3 decimals and drops trailing zeros ("255", "254.99").
fn compact(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

/// A single emitted line
#[derive(Debug, Clone, PartialEq)]
pub enum GcodeCommand {
    /// `; text`
    Comment(String),
    /// A firmware directive emitted verbatim (e.g. `G28  ;Home all axes`)
    Directive(String),
    /// Header priming motion with compact coordinates
    Prime {
        x: f64,
        y: f64,
        z: f64,
        extrude: Option<f64>,
        feed: Option<u32>,
    },
    /// Pen-up move to the start of a path
    Travel { x: f64, y: f64, feed: u32 },
    /// Pen-down move to a sampled point
    Draw { x: f64, y: f64, feed: u32 },
    PenDown { z: f64 },
    PenUp { z: f64 },
}

impl GcodeCommand {
    /// Directive with its code padded to `width` columns before the comment.
    pub fn directive(code: &str, comment: &str, width: usize) -> Self {
        Self::Directive(format!("{:<width$};{}", code, comment, width = width))
    }

    /// Planar target of a travel or draw move
    pub fn target(&self) -> Option<Point> {
        match *self {
            Self::Travel { x, y, .. } | Self::Draw { x, y, .. } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

impl fmt::Display for GcodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "; {}", text),
            Self::Directive(line) => write!(f, "{}", line),
            Self::Prime {
                x,
                y,
                z,
                extrude,
                feed,
            } => {
                // Priming lines keep the firmware's compact numbers, not 3-decimal fixed point
                write!(f, "G1 X{} Y{} Z{}", compact(*x), compact(*y), compact(*z))?;
                if let Some(e) = extrude {
                    write!(f, " E{}", e)?;
                }
                if let Some(feed) = feed {
                    write!(f, " F{}", feed)?;
                }
                Ok(())
            }
            Self::Travel { x, y, feed } | Self::Draw { x, y, feed } => {
                write!(f, "G1 X{:.3} Y{:.3} F{}", x, y, feed)
            }
            Self::PenDown { z } => write!(f, "G1 Z{:.3} ; pen down", z),
            Self::PenUp { z } => write!(f, "G1 Z{:.3} ; pen up", z),
        }
    }
}

/// Emits motion commands for paths already in visiting order.
#[derive(Debug, Clone)]
pub struct ToolpathEmitter {
    line_segments: usize,
    plot_height: f64,
    pen_up_height: f64,
    pen_offset_y: f64,
    travel_feed_rate: u32,
    draw_feed_rate: u32,
    prime_feed_rate: u32,
    bed_max_x: f64,
    bed_max_y: f64,
    draw_boundary: bool,
}

impl ToolpathEmitter {
    pub fn new(config: &ToolpathConfig) -> Self {
        Self {
            line_segments: config.line_segments.max(1),
            plot_height: config.plot_height,
            pen_up_height: config.pen_up_height(),
            pen_offset_y: config.pen_offset_y,
            travel_feed_rate: config.travel_feed_rate,
            draw_feed_rate: config.draw_feed_rate,
            prime_feed_rate: config.prime_feed_rate,
            bed_max_x: config.bed_max_x,
            bed_max_y: config.bed_max_y,
            draw_boundary: config.draw_boundary,
        }
    }

    fn travel(&self, p: Point) -> GcodeCommand {
        GcodeCommand::Travel {
            x: p.x,
            y: p.y + self.pen_offset_y,
            feed: self.travel_feed_rate,
        }
    }

    fn draw(&self, p: Point) -> GcodeCommand {
        GcodeCommand::Draw {
            x: p.x,
            y: p.y + self.pen_offset_y,
            feed: self.draw_feed_rate,
        }
    }

    /// Homes, resets extrusion, selects absolute modes, primes and lifts the pen.
    pub fn header(&self) -> Vec<GcodeCommand> {
        vec![
            GcodeCommand::Comment(INITIAL_SEQUENCE.to_string()),
            GcodeCommand::directive("G28", "Home all axes", 16),
            GcodeCommand::directive("G92 E0", "Reset extruder", 16),
            GcodeCommand::directive("M82", "Absolute extrusion coordinates", 16),
            GcodeCommand::directive("G90", "Absolute position coordinates", 16),
            GcodeCommand::Prime {
                x: 0.0,
                y: self.bed_max_y,
                z: 0.0,
                extrude: None,
                feed: None,
            },
            GcodeCommand::Prime {
                x: 0.01,
                y: self.bed_max_y - 0.01,
                z: 0.0,
                extrude: Some(PRIME_EXTRUSION),
                feed: Some(self.prime_feed_rate),
            },
            GcodeCommand::PenUp {
                z: self.pen_up_height,
            },
            GcodeCommand::Comment(INITIAL_SEQUENCE.to_string()),
        ]
    }

    /// Disables the motors.
    pub fn footer(&self) -> Vec<GcodeCommand> {
        vec![
            GcodeCommand::Comment(END_SEQUENCE.to_string()),
            GcodeCommand::directive("M84", "Disable Motors", 15),
            GcodeCommand::Comment(END_SEQUENCE.to_string()),
        ]
    }

    /// Outline of the usable plot area, drawn counter-clockwise from the origin.
    pub fn boundary(&self) -> Vec<GcodeCommand> {
        let max_x = self.bed_max_x;
        let max_y = self.bed_max_y - self.pen_offset_y;
        let origin = Point::new(0.0, 0.0);
        vec![
            self.travel(origin),
            GcodeCommand::PenDown {
                z: self.plot_height,
            },
            self.draw(Point::new(0.0, max_y)),
            self.draw(Point::new(max_x, max_y)),
            self.draw(Point::new(max_x, 0.0)),
            self.draw(origin),
            GcodeCommand::PenUp {
                z: self.pen_up_height,
            },
        ]
    }

    /// Travel, pen down, sampled draws, pen up. Empty paths emit nothing.
    pub fn path_commands(&self, path: &Path) -> Vec<GcodeCommand> {
        if path.is_empty() {
            return Vec::new();
        }

        let mut commands = Vec::with_capacity(path.len() * (self.line_segments + 1) + 3);
        let mut first = true;
        for segment in &path.segments {
            for point in segment.sample(self.line_segments) {
                if first {
                    commands.push(self.travel(point));
                    commands.push(GcodeCommand::PenDown {
                        z: self.plot_height,
                    });
                    first = false;
                } else {
                    commands.push(self.draw(point));
                }
            }
        }
        commands.push(GcodeCommand::PenUp {
            z: self.pen_up_height,
        });
        commands
    }

    /// Full command list: header, optional boundary, every path, footer.
    pub fn emit(&self, paths: &[Path]) -> Vec<GcodeCommand> {
        let mut commands = self.header();
        if self.draw_boundary {
            commands.extend(self.boundary());
        }
        for path in paths {
            commands.extend(self.path_commands(path));
        }
        commands.extend(self.footer());
        debug!("Emitted {} commands for {} paths", commands.len(), paths.len());
        commands
    }
}

/// A finished, line-oriented G-code program
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GcodeProgram {
    lines: Vec<String>,
}

impl GcodeProgram {
    /// Renders commands and collapses adjacent identical lines.
    pub fn from_commands(commands: &[GcodeCommand]) -> Self {
        let lines: Vec<String> = commands.iter().map(ToString::to_string).collect();
        Self {
            lines: GcodeOptimizer::collapse_adjacent_duplicates(&lines),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined by `\n`, no trailing newline.
    pub fn to_gcode(&self) -> String {
        self.lines.join("\n")
    }

    pub fn write_to(&self, path: &FsPath) -> std::io::Result<()> {
        std::fs::write(path, self.to_gcode())
    }
}

impl fmt::Display for GcodeProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_gcode())
    }
}
