//! Pitchdeck: assemble a product pitch deck into a PowerPoint presentation.
//!
//! A deck is described by a manifest (slide titles, body text, and an index
//! of pre-rendered images). Pitchdeck creates one slide per record, attaches
//! each slide's image at a fixed position, and writes a `.pptx` file.
//!
//! # Modules
//!
//! - [`deck`]: Slide records, manifests, and deck assembly
//! - [`resolve`]: Image path resolution with a same-directory fallback
//! - [`pptx`]: Presentation package writer and reader
//! - [`error`]: Error types for pitchdeck operations

pub mod deck;
pub mod error;
pub mod pptx;
pub mod resolve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

pub use error::PitchdeckError;

use deck::{AssembleOptions, AssemblyReport, Manifest};
use resolve::{ImageResolver, ScanOrder};

/// The pitchdeck CLI application.
#[derive(Parser)]
#[command(name = "pitchdeck")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Build the presentation and write it to disk.
    Build(BuildArgs),
    /// Resolve and load every image without writing a presentation.
    Check(CheckArgs),
    /// Summarize the slides of an existing presentation.
    Inspect(InspectArgs),
}

/// Options shared by commands that assemble a deck.
#[derive(clap::Args)]
struct DeckArgs {
    /// Deck manifest (YAML or JSON). Defaults to the built-in pitch deck.
    #[arg(long, env = "PITCHDECK_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Directory relative image paths are resolved against.
    #[arg(long, env = "PITCHDECK_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Scan fallback candidates in file-name order instead of directory order.
    #[arg(long)]
    sorted_scan: bool,

    /// Report format ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Arguments for the build subcommand.
#[derive(clap::Args)]
struct BuildArgs {
    #[command(flatten)]
    deck: DeckArgs,

    /// Output presentation path (overrides the manifest).
    #[arg(short, long, env = "PITCHDECK_OUTPUT")]
    output: Option<PathBuf>,
}

/// Arguments for the check subcommand.
#[derive(clap::Args)]
struct CheckArgs {
    #[command(flatten)]
    deck: DeckArgs,

    /// Exit non-zero if any image is missing or fails to load.
    #[arg(long)]
    strict: bool,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Presentation file to inspect.
    input: PathBuf,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Run the pitchdeck CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PitchdeckError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Build(args)) => run_build(args),
        Some(Commands::Check(args)) => run_check(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("pitchdeck {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Assemble a product pitch deck into a PowerPoint presentation.");
            println!();
            println!("Run 'pitchdeck --help' for usage information.");
            Ok(())
        }
    }
}

fn load_manifest(args: &DeckArgs) -> Result<Manifest, PitchdeckError> {
    let mut manifest = match &args.manifest {
        Some(path) => Manifest::from_path(path)?,
        None => Manifest::builtin()?,
    };
    if let Some(dir) = &args.assets_dir {
        manifest.override_assets_dir(dir.clone());
    }
    Ok(manifest)
}

fn assemble_options(args: &DeckArgs) -> AssembleOptions {
    let order = if args.sorted_scan {
        ScanOrder::Sorted
    } else {
        ScanOrder::Listing
    };
    AssembleOptions {
        resolver: ImageResolver::new(order),
        ..Default::default()
    }
}

fn check_report_format(format: &str) -> Result<(), PitchdeckError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(PitchdeckError::UnsupportedOutput(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), PitchdeckError> {
    let json = serde_json::to_string_pretty(value).map_err(PitchdeckError::ReportJson)?;
    println!("{}", json);
    Ok(())
}

/// Execute the build subcommand.
fn run_build(args: BuildArgs) -> Result<(), PitchdeckError> {
    check_report_format(&args.deck.report)?;
    let manifest = load_manifest(&args.deck)?;
    let output = args.output.clone().unwrap_or_else(|| manifest.output_path());

    let report = deck::build_and_save(
        &manifest.slides,
        &manifest.image_paths(),
        &output,
        &assemble_options(&args.deck),
    )?;

    print_report(&report, &args.deck.report, Some(&output))
}

/// Execute the check subcommand.
fn run_check(args: CheckArgs) -> Result<(), PitchdeckError> {
    check_report_format(&args.deck.report)?;
    let manifest = load_manifest(&args.deck)?;

    let (_, report) = deck::build_deck(
        &manifest.slides,
        &manifest.image_paths(),
        &assemble_options(&args.deck),
    );

    print_report(&report, &args.deck.report, None)?;

    let warnings = report.warning_count();
    if args.strict && warnings > 0 {
        Err(PitchdeckError::CheckFailed {
            warning_count: warnings,
            report,
        })
    } else {
        Ok(())
    }
}

fn print_report(
    report: &AssemblyReport,
    format: &str,
    saved_to: Option<&Path>,
) -> Result<(), PitchdeckError> {
    if format == "json" {
        return print_json(report);
    }

    print!("{}", report);
    if let Some(path) = saved_to {
        println!("Presentation saved to {}", path.display());
    }
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), PitchdeckError> {
    check_report_format(&args.report)?;
    let summary = pptx::read_pptx(&args.input)?;

    match args.report.as_str() {
        "json" => print_json(&summary),
        _ => {
            print!("{}", summary);
            Ok(())
        }
    }
}
