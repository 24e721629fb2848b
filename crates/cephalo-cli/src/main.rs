//! cephalo CLI — batch cephalometric analysis of landmark JSON files.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use cephalo::{AnalysisConfig, Analyzer, LandmarkSet};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "cephalo")]
#[command(about = "Cephalometric angles, distances and diagnostic indices from landmark coordinates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one landmark file.
    Analyze(CliAnalyzeArgs),

    /// Print the normal-range table used for validation.
    Ranges {
        /// Configuration JSON (defaults are used when omitted).
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write the default configuration as JSON.
    DumpConfig {
        /// Path to write the configuration.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Landmark JSON: `{"Sella": {"x": .., "y": ..}, ...}`.
    #[arg(long)]
    landmarks: PathBuf,

    /// Path to write the analysis (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Configuration JSON (defaults are used when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Real-world ruler length in millimetres; overrides the config value.
    #[arg(long)]
    ruler_mm: Option<f64>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::Ranges { config } => run_ranges(config.as_deref()),
        Commands::DumpConfig { out } => run_dump_config(&out),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<AnalysisConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading config: {}", path.display());
            AnalysisConfig::from_json_file(path).map_err(|e| -> CliError {
                format!("Failed to load config {}: {}", path.display(), e).into()
            })
        }
        None => Ok(AnalysisConfig::default()),
    }
}

fn build_config(args: &CliAnalyzeArgs) -> CliResult<AnalysisConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(ruler_mm) = args.ruler_mm {
        config = config.with_ruler_length_mm(ruler_mm);
        config.validate()?;
    }
    Ok(config)
}

// ── analyze ────────────────────────────────────────────────────────────

fn run_analyze(args: &CliAnalyzeArgs) -> CliResult<()> {
    tracing::info!("Loading landmarks: {}", args.landmarks.display());
    let data = std::fs::read_to_string(&args.landmarks).map_err(|e| -> CliError {
        format!("Failed to read {}: {}", args.landmarks.display(), e).into()
    })?;
    let landmarks = LandmarkSet::from_json_str(&data)?;
    tracing::info!("{} landmarks", landmarks.len());

    let analyzer = Analyzer::with_config(build_config(args)?);
    let analysis = analyzer.analyze(&landmarks);

    if !analysis.calibration.is_calibrated() {
        tracing::warn!("No usable ruler; distances are in landmark coordinate units");
    }
    for w in &analysis.warnings {
        tracing::info!(
            "{} = {} outside [{}, {}] ({:?})",
            w.name,
            w.value,
            w.expected_range[0],
            w.expected_range[1],
            w.severity,
        );
    }

    let json = serde_json::to_string_pretty(&analysis)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());

    Ok(())
}

// ── ranges ─────────────────────────────────────────────────────────────

fn run_ranges(config: Option<&Path>) -> CliResult<()> {
    let config = load_config(config)?;

    println!("cephalo normal ranges");
    println!("  severe beyond ±{} of midpoint", config.severe_deviation);
    for (name, [low, high]) in &config.normal_ranges {
        println!("  {:<14} [{}, {}]", name, low, high);
    }
    Ok(())
}

// ── dump-config ────────────────────────────────────────────────────────

fn run_dump_config(out: &Path) -> CliResult<()> {
    let json = serde_json::to_string_pretty(&AnalysisConfig::default())?;
    std::fs::write(out, &json)?;
    tracing::info!("Default config written to {}", out.display());
    Ok(())
}
