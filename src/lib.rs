//! # InkPlot
//!
//! Turns vector artwork into G-code for a 3D printer carrying a pen.
//!
//! ## Architecture
//!
//! InkPlot is organized as a workspace with multiple crates:
//!
//! 1. **inkplot-core** - Geometry types (points, segments, paths, documents) and errors
//! 2. **inkplot-settings** - Toolpath configuration, validation and persistence
//! 3. **inkplot-devicedb** - Printer profiles and page scale selection
//! 4. **inkplot-camtools** - Transform resolution, curation, ordering and G-code emission
//! 5. **inkplot** - Command-line binary that wires configuration to the pipeline
//!
//! ## Pipeline
//!
//! SVG → transforms → dedupe / split / tiny filter → normalize → scale →
//! serpentine ordering → flattening and emission → G-code file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::{debug, info};

pub use inkplot_camtools as camtools;
pub use inkplot_core::data;
pub use inkplot_devicedb as devicedb;
pub use inkplot_settings as settings;

pub use inkplot_camtools::{
    CamToolError, GcodeCommand, GcodeProgram, PathCurator, PathOrderer, SvgExtractor,
    ToolpathEmitter, ToolpathOutput, ToolpathPipeline, ToolpathStats, TransformResolver,
};
pub use inkplot_core::{BoundingBox, Document, Error, Path as VectorPath, Point, Result, Segment, ToolpathError};
pub use inkplot_devicedb::{PageLayout, PrinterProfile, ProfileRegistry, ScaleRequest, ScaleSelection};
pub use inkplot_settings::{ToolpathConfig, TransformPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so G-code can go to stdout
/// - RUST_LOG environment variable support
/// - `info` by default, `debug` when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .with_line_number(verbose);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}

/// Everything the configuration provider needs to resolve a [`ToolpathConfig`]
#[derive(Debug, Clone, Default)]
pub struct PlotOptions {
    /// Explicit config file; otherwise the default location is used if present
    pub config_file: Option<PathBuf>,
    /// Printer preset name or 1-based menu position
    pub printer: Option<String>,
    /// Extra printer profiles (JSON array)
    pub printers_file: Option<PathBuf>,
    pub line_segments: Option<usize>,
    /// How to size the page; `None` keeps a configured factor or the native size
    pub scale: Option<ScaleRequest>,
    pub split_compound: bool,
    pub draw_boundary: bool,
}

/// Loads the printer registry, including any extra profiles file.
pub fn load_registry(options: &PlotOptions) -> anyhow::Result<ProfileRegistry> {
    let mut registry = ProfileRegistry::new();
    if let Some(path) = &options.printers_file {
        registry
            .load_from_file(path)
            .with_context(|| format!("loading printer profiles from {}", path.display()))?;
    }
    Ok(registry)
}

/// Resolves configuration: defaults, then config file, then printer preset,
/// then explicit options.
pub fn resolve_config(options: &PlotOptions) -> anyhow::Result<ToolpathConfig> {
    let config_path = match &options.config_file {
        Some(path) => Some(path.clone()),
        None => settings::default_config_path().ok().filter(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            debug!("Using config file {}", path.display());
            ToolpathConfig::load_from_file(&path)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => ToolpathConfig::default(),
    };

    if let Some(selector) = &options.printer {
        let registry = load_registry(options)?;
        let profile = registry.select(selector)?;
        info!("Printer: {}", profile);
        profile.apply_to(&mut config);
    }

    if let Some(segments) = options.line_segments {
        config.line_segments = segments;
    }
    config.split_compound |= options.split_compound;
    config.draw_boundary |= options.draw_boundary;

    config.validate()?;
    Ok(config)
}

/// Page size used for the bounds check: the declared page, else the raw
/// artwork bounds.
fn page_extent(document: &Document) -> anyhow::Result<(f64, f64)> {
    if document.page_width > 0.0 && document.page_height > 0.0 {
        return Ok((document.page_width, document.page_height));
    }
    match document.bounding_box() {
        Some(bbox) if bbox.width() > 0.0 && bbox.height() > 0.0 => Ok((bbox.width(), bbox.height())),
        _ => bail!("document has no page size and no drawable area"),
    }
}

/// Picks the scale factor for `document` against the usable area of `config`.
pub fn choose_scale(
    document: &Document,
    config: &ToolpathConfig,
    request: Option<ScaleRequest>,
) -> anyhow::Result<ScaleSelection> {
    let (width, height) = page_extent(document)?;
    let (max_x, max_y) = config.usable_area();
    let request = request.unwrap_or(if config.scale_factor != 1.0 {
        ScaleRequest::Factor(config.scale_factor)
    } else {
        ScaleRequest::Keep
    });

    info!(
        "Page {:.1}x{:.1} ({}), usable area {:.1}x{:.1}",
        width,
        height,
        PageLayout::detect(width, height),
        max_x,
        max_y
    );
    Ok(devicedb::select_scale(width, height, max_x, max_y, request)?)
}

/// Converts SVG text with a resolved configuration.
pub fn convert_svg(
    svg: &str,
    mut config: ToolpathConfig,
    scale: Option<ScaleRequest>,
) -> anyhow::Result<ToolpathOutput> {
    let document = SvgExtractor::new().extract(svg)?;
    let selection = choose_scale(&document, &config, scale)?;
    config.scale_factor = selection.factor;

    let pipeline = ToolpathPipeline::new(config)?;
    Ok(pipeline.run(document)?)
}

/// Reads `input`, converts it and writes the program to `output`.
pub fn convert_file(input: &Path, output: &Path, options: &PlotOptions) -> anyhow::Result<ToolpathStats> {
    let config = resolve_config(options)?;
    let svg = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;

    let result = convert_svg(&svg, config, options.scale)?;
    result
        .program
        .write_to(output)
        .with_context(|| format!("writing {}", output.display()))?;

    info!("Wrote {} lines to {}", result.program.len(), output.display());
    Ok(result.stats)
}
