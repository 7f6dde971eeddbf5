use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    compile::plan::{DrawPlan, compile_sample},
    config::RenderConfig,
    encode::{file::write_atomic, png::encode_png},
    foundation::error::{InkError, InkResult},
    render::{
        backend::execute_plan,
        cpu::CpuSink,
        postprocess::{RenderedImage, downsample},
        svg::{SvgSink, VectorDocument},
    },
    sample::model::Sample,
};

/// Environment variable bounding the batch worker pool when no explicit thread count is given.
pub const THREADS_ENV: &str = "INKRASTER_THREADS";

/// Rasterize a compiled plan: stroke on the working canvas, then downsample and blur.
pub fn rasterize_plan(plan: &DrawPlan, cfg: &RenderConfig) -> InkResult<RenderedImage> {
    let frame = execute_plan(&mut CpuSink::new(), plan)?;
    downsample(&frame, cfg.output()?, cfg.blur_sigma)
}

/// Render a sample to the final square RGB raster.
#[tracing::instrument(skip(sample, cfg), fields(label = %sample.label))]
pub fn render_raster(sample: &Sample, cfg: &RenderConfig) -> InkResult<RenderedImage> {
    let plan = compile_sample(sample, cfg)?;
    rasterize_plan(&plan, cfg)
}

/// Render a sample to an SVG document at working-canvas resolution.
#[tracing::instrument(skip(sample, cfg), fields(label = %sample.label))]
pub fn render_vector(sample: &Sample, cfg: &RenderConfig) -> InkResult<VectorDocument> {
    let plan = compile_sample(sample, cfg)?;
    execute_plan(&mut SvgSink::new(), &plan)
}

/// One file-to-file render: an input document and its output paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderJob {
    /// Input JSON document.
    pub input: PathBuf,
    /// Destination of the PNG raster.
    pub raster_out: PathBuf,
    /// Destination of the SVG document, if one is wanted.
    pub vector_out: Option<PathBuf>,
}

impl RenderJob {
    /// Job writing only a raster.
    pub fn new(input: impl Into<PathBuf>, raster_out: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            raster_out: raster_out.into(),
            vector_out: None,
        }
    }

    /// Also write an SVG document to `path`.
    pub fn with_vector_out(mut self, path: impl Into<PathBuf>) -> Self {
        self.vector_out = Some(path.into());
        self
    }
}

/// What a successful [`render_file`] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    /// Sample label from the input document.
    pub label: String,
    /// Number of stroke calls issued to each sink.
    pub stroke_ops: usize,
    /// Raster file written.
    pub raster_out: PathBuf,
    /// Vector file written, if requested.
    pub vector_out: Option<PathBuf>,
}

/// Load, render and write one job.
///
/// Nothing is written unless the document loads and rasterizes. The raster is written first; a
/// vector failure after that leaves the raster in place and is returned as
/// [`InkError::VectorExport`].
#[tracing::instrument(skip(cfg), fields(input = %job.input.display()))]
pub fn render_file(job: &RenderJob, cfg: &RenderConfig) -> InkResult<RenderReport> {
    let sample = Sample::from_path(&job.input)?;
    let plan = compile_sample(&sample, cfg)?;
    let png = encode_png(&rasterize_plan(&plan, cfg)?)?;

    write_atomic(&job.raster_out, &png)?;
    tracing::debug!(path = %job.raster_out.display(), bytes = png.len(), "wrote raster");

    if let Some(vector_out) = &job.vector_out {
        let written = execute_plan(&mut SvgSink::new(), &plan).and_then(|doc| {
            write_atomic(vector_out, doc.as_str().as_bytes())
                .map_err(|e| InkError::vector_export(e.to_string()))
        });
        if let Err(e) = written {
            tracing::warn!(
                path = %vector_out.display(),
                error = %e,
                "vector export failed; raster kept"
            );
            return Err(match e {
                InkError::VectorExport(_) => e,
                other => InkError::vector_export(other.to_string()),
            });
        }
        tracing::debug!(path = %vector_out.display(), "wrote vector");
    }

    Ok(RenderReport {
        label: sample.label,
        stroke_ops: plan.ops.len(),
        raster_out: job.raster_out.clone(),
        vector_out: job.vector_out.clone(),
    })
}

/// Render independent jobs in parallel on a dedicated pool.
///
/// `threads` falls back to [`THREADS_ENV`], then to rayon's default. Results are in job order and
/// one job's failure does not affect the others; the outer error covers setup only.
#[tracing::instrument(skip(jobs, cfg), fields(jobs = jobs.len()))]
pub fn render_batch(
    jobs: &[RenderJob],
    cfg: &RenderConfig,
    threads: Option<usize>,
) -> InkResult<Vec<InkResult<RenderReport>>> {
    cfg.validate()?;
    let threads = match threads {
        Some(n) => Some(n),
        None => threads_from_env()?,
    };
    let pool = build_thread_pool(threads)?;
    let results: Vec<InkResult<RenderReport>> =
        pool.install(|| jobs.par_iter().map(|job| render_file(job, cfg)).collect());

    let failed = results.iter().filter(|r| r.is_err()).count();
    tracing::debug!(ok = results.len() - failed, failed, "batch finished");
    Ok(results)
}

/// Build one job per `*.json` file directly inside `input_dir`, sorted by file name.
///
/// Rasters go to `raster_dir/<stem>.png`, vectors (when `vector_dir` is set) to
/// `vector_dir/<stem>.svg`.
pub fn jobs_for_dir(
    input_dir: &Path,
    raster_dir: &Path,
    vector_dir: Option<&Path>,
) -> InkResult<Vec<RenderJob>> {
    let entries = std::fs::read_dir(input_dir).map_err(|e| InkError::input_io(input_dir, e))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| InkError::input_io(input_dir, e))?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();

    Ok(inputs
        .into_iter()
        .filter_map(|input| {
            let stem = input.file_stem()?.to_owned();
            let raster_out = raster_dir.join(with_suffix(&stem, ".png"));
            let vector_out = vector_dir.map(|d| d.join(with_suffix(&stem, ".svg")));
            Some(RenderJob {
                input,
                raster_out,
                vector_out,
            })
        })
        .collect())
}

/// `stem` plus `suffix`, keeping any dots already in the stem.
fn with_suffix(stem: &std::ffi::OsStr, suffix: &str) -> std::ffi::OsString {
    let mut name = stem.to_owned();
    name.push(suffix);
    name
}

fn threads_from_env() -> InkResult<Option<usize>> {
    match std::env::var(THREADS_ENV) {
        Ok(raw) => parse_threads(&raw).map(Some),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(InkError::config(format!("{THREADS_ENV}: {e}"))),
    }
}

fn parse_threads(raw: &str) -> InkResult<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|e| InkError::config(format!("{THREADS_ENV}='{raw}': {e}")))
}

fn build_thread_pool(threads: Option<usize>) -> InkResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(InkError::config("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| InkError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
