//! Folder-based image ranking and leaderboard reports

use crate::analysis::scan::{distance_to_color, distance_to_mode, entropy, mean_luminance, num_colors};
use crate::color::{Color, rgb};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::image::{Image, list_images, load_rgb};
use crate::io::progress::ProgressManager;
use log::{debug, info};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Image loaded for ranking along with its file metadata
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Source file
    pub path: PathBuf,
    /// Decoded pixels
    pub image: Image,
    /// Size on disk in bytes
    pub file_size: u64,
}

impl Candidate {
    /// Load an image file as a ranking candidate
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_size = std::fs::metadata(path).with_path(path)?.len();
        Ok(Self {
            path: path.to_path_buf(),
            image: load_rgb(path)?,
            file_size,
        })
    }
}

/// Scoring criterion; higher scores rank first
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Metric {
    /// Most distinct colors
    MostColors,
    /// Fewest distinct colors
    LeastColors,
    /// Highest color entropy
    MostEntropy,
    /// Lowest color entropy
    LeastEntropy,
    /// Highest mean luminance
    Brightest,
    /// Lowest mean luminance
    Darkest,
    /// Largest file
    Heaviest,
    /// Smallest file
    Lightest,
    /// Farthest from its own background color
    MostVariance,
    /// Closest to its own background color
    LeastVariance,
    /// Closest to pure red
    RedDominance,
    /// Closest to pure green
    GreenDominance,
    /// Closest to pure blue
    BlueDominance,
    /// Closest to white
    WhiteDominance,
    /// Closest to black
    BlackDominance,
}

impl Metric {
    /// Every metric, in leaderboard order
    pub const ALL: [Self; 15] = [
        Self::MostColors,
        Self::LeastColors,
        Self::MostEntropy,
        Self::LeastEntropy,
        Self::Brightest,
        Self::Darkest,
        Self::Heaviest,
        Self::Lightest,
        Self::MostVariance,
        Self::LeastVariance,
        Self::RedDominance,
        Self::GreenDominance,
        Self::BlueDominance,
        Self::WhiteDominance,
        Self::BlackDominance,
    ];

    /// Leaderboard heading
    pub const fn description(self) -> &'static str {
        match self {
            Self::MostColors => "Most amount of colors",
            Self::LeastColors => "Least amount of colors",
            Self::MostEntropy => "Most entropy",
            Self::LeastEntropy => "Least entropy",
            Self::Brightest => "Brightest",
            Self::Darkest => "Darkest",
            Self::Heaviest => "Heaviest",
            Self::Lightest => "Lightest",
            Self::MostVariance => "Most color variance",
            Self::LeastVariance => "Least color variance",
            Self::RedDominance => "Red dominance",
            Self::GreenDominance => "Green dominance",
            Self::BlueDominance => "Blue dominance",
            Self::WhiteDominance => "White dominance",
            Self::BlackDominance => "Black dominance",
        }
    }

    /// Score a candidate
    pub fn score(self, candidate: &Candidate) -> f64 {
        let pixels = candidate.image.view();
        let toward = |color: Color| -distance_to_color(pixels, color);
        match self {
            Self::MostColors => num_colors(pixels) as f64,
            Self::LeastColors => -(num_colors(pixels) as f64),
            Self::MostEntropy => entropy(pixels),
            Self::LeastEntropy => -entropy(pixels),
            Self::Brightest => mean_luminance(pixels),
            Self::Darkest => -mean_luminance(pixels),
            Self::Heaviest => candidate.file_size as f64,
            Self::Lightest => -(candidate.file_size as f64),
            Self::MostVariance => distance_to_mode(pixels),
            Self::LeastVariance => -distance_to_mode(pixels),
            Self::RedDominance => toward(rgb::RED),
            Self::GreenDominance => toward(rgb::GREEN),
            Self::BlueDominance => toward(rgb::BLUE),
            Self::WhiteDominance => toward(rgb::WHITE),
            Self::BlackDominance => toward(rgb::BLACK),
        }
    }
}

/// One entry of a ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    /// Position of the candidate in the input list
    pub index: usize,
    /// Source file
    pub path: PathBuf,
    /// Score under the ranking metric
    pub score: f64,
}

/// Rank candidates by descending score and keep the `top` best
///
/// Equal scores keep their input order.
///
/// # Errors
///
/// Returns an error if `top` is zero
pub fn rank(candidates: &[Candidate], metric: Metric, top: usize) -> Result<Vec<Ranked>> {
    if top == 0 {
        return Err(invalid_parameter("top", &top, &"must keep at least one image"));
    }
    let mut ranked: Vec<Ranked> = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| Ranked {
            index,
            path: candidate.path.clone(),
            score: metric.score(candidate),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(top);
    Ok(ranked)
}

/// Load every image of a folder as a candidate
///
/// # Errors
///
/// Returns an error if the folder cannot be listed or an image cannot be loaded
pub fn load_folder(dir: &Path, progress: Option<&mut ProgressManager>) -> Result<Vec<Candidate>> {
    let files = list_images(dir)?;
    debug!("Found {} images in {}", files.len(), dir.display());

    let mut progress = progress;
    if let Some(pm) = progress.as_deref_mut() {
        pm.start("Loading", files.len());
    }
    let mut candidates = Vec::with_capacity(files.len());
    for file in &files {
        candidates.push(Candidate::load(file)?);
        if let Some(pm) = progress.as_deref_mut() {
            pm.advance(&file.display().to_string());
        }
    }
    if let Some(pm) = progress {
        pm.finish();
    }
    Ok(candidates)
}

/// Rank the images of a folder by one metric
///
/// # Errors
///
/// Returns an error if the folder cannot be loaded or `top` is zero
pub fn rank_folder(dir: &Path, metric: Metric, top: usize) -> Result<Vec<Ranked>> {
    let candidates = load_folder(dir, None)?;
    rank(&candidates, metric, top)
}

/// Render the ranking section of one metric
pub fn format_ranking(metric: Metric, ranked: &[Ranked]) -> String {
    let mut text = format!("{} :\n", metric.description());
    for (position, entry) in ranked.iter().enumerate() {
        let _ = writeln!(
            text,
            "{}: {} -- score : {}",
            position + 1,
            entry.path.display(),
            entry.score.abs()
        );
    }
    text
}

/// Render a leaderboard over several metrics for the images of a folder
///
/// Images are loaded once and ranked under every metric.
///
/// # Errors
///
/// Returns an error if the folder cannot be loaded or `top` is zero
pub fn leaderboard(
    dir: &Path,
    metrics: &[Metric],
    top: usize,
    progress: Option<&mut ProgressManager>,
) -> Result<String> {
    let candidates = load_folder(dir, progress)?;
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    info!("Ranking {} images of experiment {name}", candidates.len());

    let rule = "-".repeat(35 + name.len());
    let mut report = format!("{rule}\n|   Leaderboard for experiment {name}   |\n{rule}\n\n");
    for &metric in metrics {
        let ranked = rank(&candidates, metric, top)?;
        report.push_str(&format_ranking(metric, &ranked));
        report.push('\n');
    }
    Ok(report)
}
