//! Toolkit constants and runtime configuration defaults

/// Fixed seed for reproducible runs
pub const DEFAULT_SEED: u64 = 42;

// Serigraph settings
/// Length of the random hexadecimal id appended to serigraph file names
pub const SERIAL_ID_LENGTH: usize = 6;
/// Iteration cap when a serigraph run is bounded by a time budget
pub const MAX_BUDGET_SAMPLES: usize = 10_000;
/// Default number of variants generated by a serigraph run
pub const DEFAULT_SERIGRAPH_COUNT: usize = 10;

// Ranking settings
/// Number of ranked images shown per leaderboard metric
pub const DEFAULT_RANKED: usize = 1;

/// Header offset after which JPEG scan data is patched
pub const JPG_BYTE_START: usize = 384;

// Output settings
/// Suffix added to partitioned output filenames
pub const OUTPUT_SUFFIX: &str = "_divided";
/// Suffix added to copies made before byte hacking
pub const COPY_SUFFIX: &str = "_copy";
/// Extensions recognised when listing image folders
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
