use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use inkplot::{convert_file, init_logging, load_registry, PlotOptions, ScaleRequest};

#[derive(Parser)]
#[command(version, about = "Convert SVG artwork into pen-plotter G-code")]
#[command(group(ArgGroup::new("sizing").args(["scale", "width", "height"])))]
struct Cli {
    /// Input SVG file
    #[arg(required_unless_present = "list_printers")]
    input: Option<PathBuf>,

    /// Output G-code file (defaults to the input name with a .gcode extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Printer preset name or menu number
    #[arg(short, long)]
    printer: Option<String>,

    /// Extra printer profiles (JSON array)
    #[arg(long, value_name = "FILE")]
    printers: Option<PathBuf>,

    /// Sample points per curve segment
    #[arg(long)]
    segments: Option<usize>,

    /// Uniform scale factor
    #[arg(long)]
    scale: Option<f64>,

    /// Scale the page to this width (mm)
    #[arg(long)]
    width: Option<f64>,

    /// Scale the page to this height (mm)
    #[arg(long)]
    height: Option<f64>,

    /// Split compound paths at internal gaps
    #[arg(long)]
    split_compound: bool,

    /// Draw the usable-area boundary before the artwork
    #[arg(long)]
    boundary: bool,

    /// Print run statistics as JSON on stdout
    #[arg(long)]
    stats: bool,

    /// List printer presets and exit
    #[arg(long)]
    list_printers: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn scale_request(&self) -> Option<ScaleRequest> {
        self.scale
            .map(ScaleRequest::Factor)
            .or(self.width.map(ScaleRequest::Width))
            .or(self.height.map(ScaleRequest::Height))
    }

    fn plot_options(&self) -> PlotOptions {
        PlotOptions {
            config_file: self.config.clone(),
            printer: self.printer.clone(),
            printers_file: self.printers.clone(),
            line_segments: self.segments,
            scale: self.scale_request(),
            split_compound: self.split_compound,
            draw_boundary: self.boundary,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let options = cli.plot_options();

    if cli.list_printers {
        let registry = load_registry(&options)?;
        for (i, profile) in registry.profiles().iter().enumerate() {
            println!("{}. {}", i + 1, profile);
        }
        return Ok(());
    }

    let input = cli.input.clone().context("an input file is required")?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| input.with_extension("gcode"));

    let stats = convert_file(&input, &output, &options)?;

    if cli.stats {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}
