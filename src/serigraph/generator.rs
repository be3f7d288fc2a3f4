//! Batch generation of randomized variants ("serigraphs") of one source image

use crate::io::configuration::{DEFAULT_SERIGRAPH_COUNT, MAX_BUDGET_SAMPLES, SERIAL_ID_LENGTH};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::image::{Image, check_image, save};
use crate::io::progress::ProgressManager;
use crate::morph::effect::{DEFAULT_BLUR_RADIUS, Effect};
use crate::partition::divider::{Divider, SampleSize, Selection};
use crate::partition::grid::{RegularGridDivider, crop_to_multiple};
use crate::serigraph::params::{ParamSet, ParamSpace, random_hex};
use log::{debug, info};
use rand::Rng;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// When a run stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Produce exactly this many images
    Count(usize),
    /// Keep producing until cumulative render time exceeds the budget
    ///
    /// Never more than `MAX_BUDGET_SAMPLES` images.
    Budget(Duration),
}

impl Default for Limit {
    fn default() -> Self {
        Self::Count(DEFAULT_SERIGRAPH_COUNT)
    }
}

/// Output settings of a serigraph run
#[derive(Debug, Clone)]
pub struct SerigraphConfig {
    /// Prefix of every generated file
    pub basename: String,
    /// Folder receiving the images and the summary
    pub out_dir: PathBuf,
    /// Stop condition
    pub limit: Limit,
    /// Remove earlier outputs sharing the basename before generating
    pub erase_previous: bool,
    /// Write `<basename>_summary.txt` after the run
    pub summary: bool,
}

impl SerigraphConfig {
    /// Default run: a fixed count, previous outputs kept, summary written
    pub fn new(basename: &str, out_dir: &Path) -> Self {
        Self {
            basename: basename.to_string(),
            out_dir: out_dir.to_path_buf(),
            limit: Limit::default(),
            erase_previous: false,
            summary: true,
        }
    }

    fn summary_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}_summary.txt", self.basename))
    }

    /// `<basename>_<serial>.png`, redrawing the serial until no file carries it
    fn fresh_output_path<R: Rng + ?Sized>(&self, rng: &mut R) -> PathBuf {
        loop {
            let serial = random_hex(SERIAL_ID_LENGTH, rng);
            let path = self.out_dir.join(format!("{}_{serial}.png", self.basename));
            if !path.exists() {
                return path;
            }
            debug!("Serial {serial} already taken, drawing another");
        }
    }

    fn is_previous_output(&self, path: &Path) -> bool {
        let prefix = format!("{}_", self.basename);
        path.extension().is_some_and(|ext| ext == "png")
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix))
    }
}

/// Image transformation driven by a sampled parameter set
pub trait Recipe {
    /// Produce one variant of `source`
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is missing or invalid for the source
    fn render<R: Rng + ?Sized>(&self, source: &Image, params: &ParamSet, rng: &mut R)
    -> Result<Image>;
}

/// Square grid over the source with an effect applied to a random share of cells
///
/// Parameters:
/// - `cell`: side of the square cells in pixels
/// - `fraction`: share of cells affected, in (0, 1]
/// - `effect`: effect name (see [`Effect`])
/// - `blur_radius` (optional): radius of the `blur` effect
#[derive(Debug, Clone, Copy, Default)]
pub struct GridEffectRecipe;

impl GridEffectRecipe {
    /// Parameter space exploring every effect over the cell sizes that fit `source`
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not a non-empty three-channel image
    pub fn default_space(source: &Image) -> Result<ParamSpace> {
        let (height, width) = check_image(source)?;
        let side = height.min(width);
        if side == 0 {
            return Err(invalid_parameter("source", &format!("{height}x{width}"), &"image is empty"));
        }
        let mut cells: Vec<usize> = [8, 16, 32, 64].into_iter().filter(|&c| c <= side).collect();
        if cells.is_empty() {
            cells.push(side);
        }
        let effects: Vec<&str> = Effect::ALL.iter().map(|e| e.name()).collect();
        ParamSpace::from_value(serde_json::json!({
            "cell": cells,
            "fraction": [0.1, 0.25, 0.5, 0.75],
            "effect": effects,
            "blur_radius": [1.0, 2.0, 4.0],
        }))
    }
}

impl Recipe for GridEffectRecipe {
    fn render<R: Rng + ?Sized>(
        &self,
        source: &Image,
        params: &ParamSet,
        rng: &mut R,
    ) -> Result<Image> {
        let (height, width) = check_image(source)?;
        let cell = usize::try_from(params.u64("cell")?).unwrap_or(usize::MAX);
        if cell == 0 || cell > height || cell > width {
            return Err(invalid_parameter(
                "cell",
                &cell,
                &format!("must be in 1..={}", height.min(width)),
            ));
        }
        let fraction = params.f64("fraction")?;
        let effect: Effect = params.str("effect")?.parse()?;
        let blur_radius = match params.get("blur_radius") {
            Some(_) => params.f64("blur_radius")? as f32,
            None => DEFAULT_BLUR_RADIUS,
        };

        let cropped = crop_to_multiple(source, (cell, cell))?;
        let mut divider = RegularGridDivider::new(cropped, (cell, cell))?;
        effect.run(
            &mut divider,
            &Selection::Sample(SampleSize::Fraction(fraction)),
            blur_radius,
            rng,
        )?;
        Ok(divider.stitch())
    }
}

/// One generated image
#[derive(Debug, Clone)]
pub struct SerigraphRecord {
    /// Saved file
    pub path: PathBuf,
    /// Parameters the image was rendered with
    pub params: ParamSet,
    /// Render time, excluding encoding
    pub elapsed: Duration,
}

fn erase_previous(config: &SerigraphConfig) -> Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(&config.out_dir).with_path(&config.out_dir)? {
        let path = entry.with_path(&config.out_dir)?.path();
        if config.is_previous_output(&path) {
            std::fs::remove_file(&path).with_path(&path)?;
            removed += 1;
        }
    }
    let summary = config.summary_path();
    if summary.exists() {
        std::fs::remove_file(&summary).with_path(&summary)?;
    }
    Ok(removed)
}

/// Render and save variants of `source` until the configured limit is reached
///
/// # Errors
///
/// Returns an error if:
/// - The limit is zero
/// - The output folder cannot be prepared
/// - A render fails or an image cannot be saved
pub fn run_serigraph<P, R>(
    source: &Image,
    space: &ParamSpace,
    recipe: &P,
    config: &SerigraphConfig,
    rng: &mut R,
    progress: Option<&mut ProgressManager>,
) -> Result<Vec<SerigraphRecord>>
where
    P: Recipe,
    R: Rng + ?Sized,
{
    let (max_images, budget) = match config.limit {
        Limit::Count(0) => return Err(invalid_parameter("limit", &0, &"must be positive")),
        Limit::Budget(d) if d.is_zero() => {
            return Err(invalid_parameter("limit", &"0s", &"must be positive"));
        }
        Limit::Count(n) => (n, None),
        Limit::Budget(d) => (MAX_BUDGET_SAMPLES, Some(d)),
    };

    std::fs::create_dir_all(&config.out_dir).with_path(&config.out_dir)?;
    if config.erase_previous {
        let removed = erase_previous(config)?;
        info!("Removed {removed} previous outputs of {}", config.basename);
    }

    let mut progress = progress;
    if let Some(pm) = progress.as_deref_mut() {
        match budget {
            Some(_) => pm.start_open_ended("Serigraph"),
            None => pm.start("Serigraph", max_images),
        }
    }

    let mut records = Vec::new();
    let mut spent = Duration::ZERO;
    while records.len() < max_images {
        let params = space.sample(rng);
        let started = Instant::now();
        let image = recipe.render(source, &params, rng)?;
        let elapsed = started.elapsed();

        let path = config.fresh_output_path(rng);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        save(&image, &path)?;
        debug!("Saved {} in {:.3}s", path.display(), elapsed.as_secs_f64());

        if let Some(pm) = progress.as_deref_mut() {
            pm.advance(&name);
        }
        records.push(SerigraphRecord {
            path,
            params,
            elapsed,
        });

        spent += elapsed;
        if budget.is_some_and(|b| spent > b) {
            break;
        }
    }

    if let Some(pm) = progress {
        pm.finish();
    }
    if config.summary {
        let summary = config.summary_path();
        std::fs::write(&summary, summarize(&records)).with_path(&summary)?;
    }
    info!(
        "Generated {} serigraphs of {} in {:.3}s",
        records.len(),
        config.basename,
        spent.as_secs_f64()
    );
    Ok(records)
}

/// Text report listing every image with its parameters and render time
pub fn summarize(records: &[SerigraphRecord]) -> String {
    let mut text = format!("Serigraph summary ({} images)\n\n", records.len());
    for record in records {
        let name = record
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let _ = writeln!(text, "{name}");
        let _ = write!(text, "{}", record.params);
        let _ = writeln!(
            text,
            "processing time: {:.3}s\n",
            record.elapsed.as_secs_f64()
        );
    }
    text
}
