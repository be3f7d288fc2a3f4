//! Command-line interface for partitioning, ranking, serigraph and hacking commands

use crate::analysis::ranking::{Metric, format_ranking, leaderboard, load_folder, rank};
use crate::io::configuration::{DEFAULT_RANKED, DEFAULT_SEED, DEFAULT_SERIGRAPH_COUNT, OUTPUT_SUFFIX};
use crate::io::error::{ImgprocError, Result, WithPath, invalid_parameter};
use crate::io::hack::{ByteEdit, switch_bytes_jpeg};
use crate::io::image::{Image, check_image, describe, load_rgb, save};
use crate::io::progress::ProgressManager;
use crate::morph::effect::{DEFAULT_BLUR_RADIUS, Effect};
use crate::partition::band::{BandDivider, Orientation};
use crate::partition::divider::{Divider, SampleSize, Selection};
use crate::partition::grid::{RegularGridDivider, crop_to_multiple};
use crate::partition::ring::CircularDivider;
use crate::partition::voronoi::VoronoiDivider;
use crate::serigraph::generator::{GridEffectRecipe, Limit, SerigraphConfig, run_serigraph};
use crate::serigraph::params::ParamSpace;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "imgproc")]
#[command(author, version, about = "Partition, transform, rank and glitch images")]
/// Command-line arguments shared by every subcommand
pub struct Cli {
    /// Random seed for reproducible runs
    #[arg(short, long, global = true, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Partitioning scheme of the `divide` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    /// Parallel strips split at `--boundaries`
    Bands,
    /// Square cells of side `--cell`
    Grid,
    /// Concentric rings at `--radii`
    Rings,
    /// Cells around `--seeds` random seeds
    Voronoi,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Partition an image and apply an effect to some of its containers
    Divide {
        /// Source image
        input: PathBuf,
        /// Output file (defaults to `<stem>_divided.<ext>` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Partitioning scheme
        #[arg(long, value_enum, default_value_t = Scheme::Grid)]
        scheme: Scheme,
        /// Effect applied to the selected containers
        #[arg(short, long, value_enum, default_value_t = Effect::Paint)]
        effect: Effect,
        /// Share of containers affected, in (0, 1]; all containers when omitted
        #[arg(short, long)]
        fraction: Option<f64>,
        /// Band boundaries
        #[arg(long, value_delimiter = ',')]
        boundaries: Vec<usize>,
        /// Band orientation (`horizontal` or `vertical`)
        #[arg(long, default_value = "horizontal")]
        orientation: Orientation,
        /// Grid cell side in pixels; the image is cropped to a multiple
        #[arg(long, default_value_t = 32)]
        cell: usize,
        /// Ring radii
        #[arg(long, value_delimiter = ',')]
        radii: Vec<f64>,
        /// Number of random Voronoi seeds
        #[arg(long, default_value_t = 16)]
        seeds: usize,
        /// Nearest seeds keying each Voronoi pixel
        #[arg(long, default_value_t = 1)]
        neighbors: usize,
        /// Key Voronoi cells by the set of nearest seeds rather than their ranking
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        ordered: bool,
        /// Blur radius of the `blur` effect
        #[arg(long, default_value_t = DEFAULT_BLUR_RADIUS)]
        blur_radius: f32,
    },
    /// Rank the images of a folder by one metric
    Rank {
        /// Folder of images
        dir: PathBuf,
        /// Ranking metric
        #[arg(short, long, value_enum)]
        metric: Metric,
        /// Number of images kept
        #[arg(short, long, default_value_t = DEFAULT_RANKED)]
        top: usize,
    },
    /// Rank the images of a folder under every metric
    Leaderboard {
        /// Folder of images
        dir: PathBuf,
        /// Number of images kept per metric
        #[arg(short, long, default_value_t = DEFAULT_RANKED)]
        top: usize,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate random grid-effect variants of an image
    Serigraph {
        /// Source image
        input: PathBuf,
        /// Output folder
        #[arg(short, long)]
        out_dir: PathBuf,
        /// File name prefix (defaults to the input stem)
        #[arg(short, long)]
        basename: Option<String>,
        /// Number of variants
        #[arg(short, long, default_value_t = DEFAULT_SERIGRAPH_COUNT, conflicts_with = "budget")]
        count: usize,
        /// Time budget in seconds instead of a count
        #[arg(long)]
        budget: Option<f64>,
        /// JSON parameter space (defaults to every effect over a few cell sizes)
        #[arg(short, long)]
        params: Option<PathBuf>,
        /// Remove earlier outputs with the same basename
        #[arg(long)]
        erase: bool,
        /// Skip the summary file
        #[arg(long)]
        no_summary: bool,
    },
    /// Overwrite bytes of a JPEG file
    Hack {
        /// JPEG file
        input: PathBuf,
        /// Edits as `POSITION:HEX`
        #[arg(short, long = "edit", required = true)]
        edits: Vec<ByteEdit>,
        /// Modify the file itself instead of a copy
        #[arg(long)]
        in_place: bool,
    },
    /// Describe an image file
    Info {
        /// Image file
        input: PathBuf,
    },
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    fn progress(&self) -> ProgressManager {
        if self.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the subcommand
    // Allow print for command output written to stdout
    #[allow(clippy::print_stdout)]
    pub fn run(&self) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        match &self.command {
            Command::Divide {
                input,
                output,
                scheme,
                effect,
                fraction,
                boundaries,
                orientation,
                cell,
                radii,
                seeds,
                neighbors,
                ordered,
                blur_radius,
            } => {
                let image = load_rgb(input)?;
                let plan = DividePlan {
                    effect: *effect,
                    fraction: *fraction,
                    blur_radius: *blur_radius,
                };
                let divided = match scheme {
                    Scheme::Bands => {
                        plan.run(BandDivider::new(image, boundaries, *orientation)?, &mut rng)?
                    }
                    Scheme::Grid => {
                        let cropped = crop_to_multiple(&image, (*cell, *cell))?;
                        plan.run(RegularGridDivider::new(cropped, (*cell, *cell))?, &mut rng)?
                    }
                    Scheme::Rings => plan.run(CircularDivider::new(image, radii, None)?, &mut rng)?,
                    Scheme::Voronoi => {
                        let points = random_seeds(&image, *seeds, &mut rng)?;
                        plan.run(
                            VoronoiDivider::new(image, &points, *neighbors, *ordered)?,
                            &mut rng,
                        )?
                    }
                };
                let destination = output.clone().unwrap_or_else(|| output_path(input));
                save(&divided, &destination)?;
                info!("Saved {}", destination.display());
            }
            Command::Rank { dir, metric, top } => {
                let mut progress = self.progress();
                let candidates = load_folder(dir, Some(&mut progress))?;
                let ranked = rank(&candidates, *metric, *top)?;
                print!("{}", format_ranking(*metric, &ranked));
            }
            Command::Leaderboard { dir, top, output } => {
                let mut progress = self.progress();
                let report = leaderboard(dir, &Metric::ALL, *top, Some(&mut progress))?;
                match output {
                    Some(path) => {
                        std::fs::write(path, report).with_path(path)?;
                        info!("Leaderboard written to {}", path.display());
                    }
                    None => print!("{report}"),
                }
            }
            Command::Serigraph {
                input,
                out_dir,
                basename,
                count,
                budget,
                params,
                erase,
                no_summary,
            } => {
                let source = load_rgb(input)?;
                let space = match params {
                    Some(path) => ParamSpace::from_json_file(path)?,
                    None => GridEffectRecipe::default_space(&source)?,
                };
                let limit = match budget {
                    Some(seconds) => Limit::Budget(
                        Duration::try_from_secs_f64(*seconds)
                            .ok()
                            .ok_or_else(|| invalid_parameter("budget", seconds, &"not a valid duration"))?,
                    ),
                    None => Limit::Count(*count),
                };
                let basename = basename.clone().unwrap_or_else(|| file_stem(input));
                let config = SerigraphConfig {
                    limit,
                    erase_previous: *erase,
                    summary: !no_summary,
                    ..SerigraphConfig::new(&basename, out_dir)
                };
                let mut progress = self.progress();
                run_serigraph(
                    &source,
                    &space,
                    &GridEffectRecipe,
                    &config,
                    &mut rng,
                    Some(&mut progress),
                )?;
            }
            Command::Hack {
                input,
                edits,
                in_place,
            } => {
                let modified = switch_bytes_jpeg(input, edits, !in_place)?;
                info!("Wrote {} edits to {}", edits.len(), modified.display());
            }
            Command::Info { input } => {
                let described = describe(input)?;
                let format = described
                    .format
                    .map_or_else(|| "unknown".to_string(), |f| format!("{f:?}"));
                println!("Extension: {}", described.extension);
                println!("Format: {format}");
                println!(
                    "Dimensions: {}x{} (height x width)",
                    described.dimensions.0, described.dimensions.1
                );
                println!("Size: {}", described.size);
            }
        }
        Ok(())
    }
}

/// Effect settings of one `divide` invocation
#[derive(Debug, Clone, Copy)]
struct DividePlan {
    effect: Effect,
    fraction: Option<f64>,
    blur_radius: f32,
}

impl DividePlan {
    fn run<D: Divider, R: Rng + ?Sized>(self, mut divider: D, rng: &mut R) -> Result<Image> {
        let selection = self
            .fraction
            .map_or(Selection::All, |f| Selection::Sample(SampleSize::Fraction(f)));
        self.effect
            .run(&mut divider, &selection, self.blur_radius, rng)?;
        Ok(divider.stitch())
    }
}

/// Draw `count` random integer seed coordinates inside the image
fn random_seeds<R: Rng + ?Sized>(image: &Image, count: usize, rng: &mut R) -> Result<Vec<[f64; 2]>> {
    let (height, width) = check_image(image)?;
    if height == 0 || width == 0 {
        return Err(ImgprocError::InvalidSourceData {
            reason: "cannot place seeds in an empty image".to_string(),
        });
    }
    Ok((0..count)
        .map(|_| {
            [
                rng.random_range(0..height) as f64,
                rng.random_range(0..width) as f64,
            ]
        })
        .collect())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Default output of the `divide` command: `<stem>_divided.<ext>` next to the input
pub fn output_path(input: &Path) -> PathBuf {
    let extension = input.extension().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        file_stem(input),
        OUTPUT_SUFFIX,
        extension.to_string_lossy()
    );
    input.with_file_name(output_name)
}
