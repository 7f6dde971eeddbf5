use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "inkraster", version, about = "Render pen-stroke samples to training images")]
struct Cli {
    /// Input sample JSON, or a directory of them.
    input: PathBuf,

    /// Output PNG path (a directory when INPUT is a directory).
    output: PathBuf,

    /// Also write an SVG at working-canvas resolution (a directory in batch mode).
    #[arg(long)]
    svg: Option<PathBuf>,

    /// JSON render config; the flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stroke width in canvas pixels at pressure 1.
    #[arg(long)]
    base_width: Option<f64>,

    /// Edge length of the supersampled working canvas.
    #[arg(long)]
    canvas_size: Option<u32>,

    /// Edge length of the output raster.
    #[arg(long)]
    output_size: Option<u32>,

    /// Stroke width policy.
    #[arg(long, value_enum)]
    width_policy: Option<WidthChoice>,

    /// Coordinate fit scope.
    #[arg(long, value_enum)]
    normalization: Option<NormalizationChoice>,

    /// Worker threads in batch mode (defaults to INKRASTER_THREADS, then the CPU count).
    #[arg(long)]
    threads: Option<usize>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WidthChoice {
    Uniform,
    Tapered,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NormalizationChoice {
    PerStroke,
    PerSample,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = build_config(&cli)?;
    if cli.input.is_dir() {
        cmd_batch(&cli, &cfg)
    } else {
        cmd_single(&cli, &cfg)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<inkraster::RenderConfig> {
    let mut cfg = match &cli.config {
        Some(path) => inkraster::RenderConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => inkraster::RenderConfig::default(),
    };

    if let Some(w) = cli.base_width {
        cfg.base_width = w;
    }
    if let Some(n) = cli.canvas_size {
        cfg.canvas_size = n;
    }
    if let Some(n) = cli.output_size {
        cfg.output_size = n;
    }
    if let Some(p) = cli.width_policy {
        cfg.width_policy = match p {
            WidthChoice::Uniform => inkraster::WidthPolicy::Uniform,
            WidthChoice::Tapered => inkraster::WidthPolicy::Tapered,
        };
    }
    if let Some(n) = cli.normalization {
        cfg.normalization = match n {
            NormalizationChoice::PerStroke => inkraster::Normalization::PerStroke,
            NormalizationChoice::PerSample => inkraster::Normalization::PerSample,
        };
    }

    cfg.validate().context("validate render config")?;
    Ok(cfg)
}

fn cmd_single(cli: &Cli, cfg: &inkraster::RenderConfig) -> anyhow::Result<()> {
    let mut job = inkraster::RenderJob::new(&cli.input, &cli.output);
    if let Some(svg) = &cli.svg {
        job = job.with_vector_out(svg);
    }

    let report = inkraster::render_file(&job, cfg)
        .with_context(|| format!("render '{}'", cli.input.display()))?;

    print_report(&report);
    Ok(())
}

fn cmd_batch(cli: &Cli, cfg: &inkraster::RenderConfig) -> anyhow::Result<()> {
    let jobs = inkraster::jobs_for_dir(&cli.input, &cli.output, cli.svg.as_deref())
        .with_context(|| format!("list samples in '{}'", cli.input.display()))?;
    if jobs.is_empty() {
        eprintln!("no *.json samples in {}", cli.input.display());
        return Ok(());
    }

    let results = inkraster::render_batch(&jobs, cfg, cli.threads)?;

    let mut failed = 0usize;
    for (job, result) in jobs.iter().zip(results) {
        match result {
            Ok(report) => print_report(&report),
            Err(e) => {
                failed += 1;
                eprintln!("failed {}: {e}", display_name(&job.input));
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} samples failed", jobs.len());
    }
    Ok(())
}

fn print_report(report: &inkraster::RenderReport) {
    eprintln!("wrote {}", report.raster_out.display());
    if let Some(svg) = &report.vector_out {
        eprintln!("wrote {}", svg.display());
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
