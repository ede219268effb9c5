//! wcagscan CLI - WCAG color-contrast audit tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use wcagscan::settings::{self, FileStore};
use wcagscan::traverse::{collect_solid_fill_nodes, collect_text_nodes};
use wcagscan::{
    check_contrast, format_ratio, is_large_text, load_scene_bytes, render, scan,
    scan_async_with_timeout, Error, JsonFormat, LoadedFonts, NodeId, RenderOptions,
    ResultSelection, Scene, ScanOptions, ScanReport, ThresholdConfig,
};

/// Settings file used when neither `--settings` nor `WCAGSCAN_SETTINGS` is given.
const DEFAULT_SETTINGS_FILE: &str = ".wcagscan.json";

#[derive(Parser)]
#[command(name = "wcagscan")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Audit design documents for WCAG 2.1 color contrast", long_about = None)]
struct Cli {
    /// Settings file holding custom thresholds
    #[arg(long, global = true, env = "WCAGSCAN_SETTINGS", value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a scene snapshot for contrast failures
    Scan {
        /// Scene snapshot JSON ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Node identifiers to scan (defaults to the saved selection)
        #[arg(short, long = "node", value_name = "ID")]
        nodes: Vec<String>,

        /// Scan every top-level layer of the page
        #[arg(long, conflicts_with = "nodes")]
        all: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Which results to list (all, failures, passes, text, color)
        #[arg(long, default_value = "all")]
        show: String,

        /// List only failing results
        #[arg(long)]
        failures_only: bool,

        /// Show resolved foreground and background colors
        #[arg(long)]
        colors: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Disable parallel evaluation
        #[arg(long)]
        sequential: bool,

        /// Abort the scan after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<f64>,

        /// Exit with an error when any result fails
        #[arg(long)]
        strict: bool,
    },

    /// Check the contrast of a foreground/background pair
    Check {
        /// Foreground color (#rgb or #rrggbb)
        foreground: String,

        /// Background color (#rgb or #rrggbb)
        background: String,

        /// Font size in px, to classify text as large
        #[arg(long)]
        size: Option<f64>,

        /// Numeric font weight
        #[arg(long, default_value = "400")]
        weight: f64,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Show scene information
    Info {
        /// Scene snapshot JSON ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Manage persisted thresholds
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the persisted thresholds
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Persist thresholds
    Set {
        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Forget persisted thresholds
    Reset,
}

#[derive(Args)]
struct ThresholdArgs {
    /// Required ratio for normal text
    #[arg(long, value_name = "RATIO")]
    normal: Option<f64>,

    /// Required ratio for large text
    #[arg(long, value_name = "RATIO")]
    large: Option<f64>,

    /// Required ratio for non-text layers
    #[arg(long, value_name = "RATIO")]
    non_text: Option<f64>,

    /// Start from the WCAG AAA ratios
    #[arg(long)]
    aaa: bool,
}

impl ThresholdArgs {
    /// Apply the flags on top of `base`.
    fn apply(&self, base: ThresholdConfig) -> wcagscan::Result<ThresholdConfig> {
        let mut thresholds = if self.aaa {
            ThresholdConfig::wcag_aaa()
        } else {
            base
        };
        if let Some(ratio) = self.normal {
            thresholds.normal_text = ratio;
        }
        if let Some(ratio) = self.large {
            thresholds.large_text = ratio;
        }
        if let Some(ratio) = self.non_text {
            thresholds.non_text = ratio;
        }
        thresholds.validate()?;
        Ok(thresholds)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text, one result per line
    Text,
    /// Markdown report
    Markdown,
    /// JSON report
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let settings_path = cli
        .settings
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

    let result = match cli.command {
        Some(Commands::Scan {
            input,
            nodes,
            all,
            thresholds,
            format,
            compact,
            show,
            failures_only,
            colors,
            output,
            sequential,
            timeout,
            strict,
        }) => {
            let request = ScanArgs {
                nodes,
                all,
                format,
                compact,
                show,
                failures_only,
                colors,
                sequential,
                timeout,
                strict,
            };
            cmd_scan(
                &input,
                &settings_path,
                &thresholds,
                &request,
                output.as_deref(),
            )
        }
        Some(Commands::Check {
            foreground,
            background,
            size,
            weight,
            thresholds,
        }) => cmd_check(
            &foreground,
            &background,
            size,
            weight,
            &thresholds,
            &settings_path,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Settings { action }) => cmd_settings(&settings_path, action),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: wcagscan scan <FILE>".yellow());
            println!("       wcagscan --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

struct ScanArgs {
    nodes: Vec<String>,
    all: bool,
    format: OutputFormat,
    compact: bool,
    show: String,
    failures_only: bool,
    colors: bool,
    sequential: bool,
    timeout: Option<f64>,
    strict: bool,
}

fn read_scene(input: &Path) -> Result<Scene, Box<dyn std::error::Error>> {
    let data = if input.as_os_str() == "-" {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        data
    } else {
        fs::read(input)?
    };
    Ok(load_scene_bytes(&data)?)
}

fn base_thresholds(settings_path: &Path) -> wcagscan::Result<ThresholdConfig> {
    let store = FileStore::open(settings_path)?;
    settings::load_thresholds(&store)
}

fn cmd_scan(
    input: &Path,
    settings_path: &Path,
    threshold_args: &ThresholdArgs,
    args: &ScanArgs,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let thresholds = threshold_args.apply(base_thresholds(settings_path)?)?;
    let selection = if args.failures_only {
        ResultSelection::Failures
    } else {
        ResultSelection::parse(&args.show).map_err(|e| format!("Invalid --show: {}", e))?
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading scene...");
    let scene = read_scene(input)?;

    let roots: Vec<NodeId> = if args.all {
        scene.top_level().to_vec()
    } else if args.nodes.is_empty() {
        scene.selection().to_vec()
    } else {
        args.nodes
            .iter()
            .map(|key| scene.find(key).ok_or_else(|| Error::UnknownNode(key.clone())))
            .collect::<Result<_, _>>()?
    };

    log::debug!(
        "Scanning {} root(s) of '{}' with {:?}",
        roots.len(),
        scene.name(),
        thresholds
    );

    let options = ScanOptions::new()
        .with_thresholds(thresholds)
        .with_parallel(!args.sequential);

    pb.set_message("Scanning...");
    let document = scene.name().to_string();
    let response = match args.timeout {
        Some(secs) => {
            let timeout = Duration::try_from_secs_f64(secs)
                .map_err(|e| format!("Invalid --timeout: {}", e))?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(scan_async_with_timeout(
                Arc::new(scene),
                Arc::new(LoadedFonts),
                &roots,
                &options,
                timeout,
            ))?
        }
        None => scan(&scene, &roots, &options),
    };
    pb.finish_and_clear();

    let mut report = ScanReport::new(response, thresholds).with_document(document);
    if input.as_os_str() != "-" {
        report = report.with_source(input.display().to_string());
    }

    let render_options = RenderOptions::new()
        .with_selection(selection)
        .with_colors(args.colors);

    let content = match args.format {
        OutputFormat::Text => render::to_text(&report, &render_options)?,
        OutputFormat::Markdown => render::to_markdown(&report, &render_options)?,
        OutputFormat::Json => {
            let format = if args.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json_report = report.clone().select(selection);
            render::to_json(&json_report, format)?
        }
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    if let Some(ref error) = report.response.error {
        eprintln!("{} {}", "Warning:".yellow().bold(), error);
    } else if report.has_failures() {
        eprintln!(
            "{} {} of {} checks below the required ratio",
            "Failed:".red().bold(),
            report.stats.failed,
            report.stats.total()
        );
        if args.strict {
            return Err(format!("{} contrast failures", report.stats.failed).into());
        }
    } else {
        eprintln!("{} {} checks passed", "OK:".green().bold(), report.stats.total());
    }

    Ok(())
}

fn cmd_check(
    foreground: &str,
    background: &str,
    size: Option<f64>,
    weight: f64,
    threshold_args: &ThresholdArgs,
    settings_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let thresholds = threshold_args.apply(base_thresholds(settings_path)?)?;
    let ratio = check_contrast(foreground, background)?;

    println!(
        "{}: {}:1",
        "Contrast".bold(),
        format_ratio(ratio).cyan().bold()
    );

    let verdict = |required: f64| {
        if ratio >= required {
            "pass".green()
        } else {
            "fail".red()
        }
    };

    match size {
        Some(size) => {
            let large = is_large_text(size, weight);
            let required = thresholds.required_for_text(large);
            println!(
                "{} ({}): {} (requires {}:1)",
                "Text".bold(),
                if large { "large" } else { "normal" },
                verdict(required),
                format_ratio(required)
            );
        }
        None => {
            println!(
                "{}: {} (requires {}:1)",
                "Normal text".bold(),
                verdict(thresholds.normal_text),
                format_ratio(thresholds.normal_text)
            );
            println!(
                "{}: {} (requires {}:1)",
                "Large text".bold(),
                verdict(thresholds.large_text),
                format_ratio(thresholds.large_text)
            );
        }
    }
    println!(
        "{}: {} (requires {}:1)",
        "Non-text".bold(),
        verdict(thresholds.non_text),
        format_ratio(thresholds.non_text)
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let scene = read_scene(input)?;
    let max_depth = ScanOptions::default().max_depth;
    let text_nodes = collect_text_nodes(&scene, scene.top_level(), max_depth);
    let fill_nodes = collect_solid_fill_nodes(&scene, scene.top_level(), max_depth);

    println!("{}", "Scene Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Page".bold(), scene.name());
    println!("{}: {}", "Layers".bold(), scene.len() - 1);
    println!("{}: {}", "Top-level".bold(), scene.top_level().len());

    println!();
    println!("{}", "Scan Candidates".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Visible text".bold(), text_nodes.len());
    println!("{}: {}", "Solid fills".bold(), fill_nodes.len());

    let selected: Vec<&str> = scene
        .selection()
        .iter()
        .filter_map(|&id| scene.get(id))
        .map(|node| node.key.as_str())
        .collect();
    if selected.is_empty() {
        println!("{}: {}", "Selection".bold(), "none".dimmed());
    } else {
        println!("{}: {}", "Selection".bold(), selected.join(", "));
    }

    Ok(())
}

fn cmd_settings(path: &Path, action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open(path)?;

    match action {
        SettingsAction::Show { json } => {
            let thresholds = settings::load_thresholds(&store)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&thresholds)?);
            } else {
                println!("{}: {}", "Settings".bold(), path.display());
                print_thresholds(&thresholds);
            }
        }
        SettingsAction::Set { thresholds } => {
            let current = settings::load_thresholds(&store)?;
            let updated = thresholds.apply(current)?;
            settings::save_thresholds(&mut store, &updated)?;
            println!("{} {}", "Saved to".green(), path.display());
            print_thresholds(&updated);
        }
        SettingsAction::Reset => {
            settings::reset_thresholds(&mut store)?;
            println!("{}", "Thresholds reset to WCAG AA defaults".green());
            print_thresholds(&ThresholdConfig::default());
        }
    }

    Ok(())
}

fn print_thresholds(thresholds: &ThresholdConfig) {
    println!(
        "  {} normal text {}:1",
        "├─".dimmed(),
        format_ratio(thresholds.normal_text)
    );
    println!(
        "  {} large text  {}:1",
        "├─".dimmed(),
        format_ratio(thresholds.large_text)
    );
    println!(
        "  {} non-text    {}:1",
        "└─".dimmed(),
        format_ratio(thresholds.non_text)
    );
}

fn cmd_version() {
    println!("{} {}", "wcagscan".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("WCAG 2.1 color-contrast audit tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/wcagscan".dimmed());
    println!("License: MIT");
}
