//! Input/output: CLI, configuration, errors, image files and progress display

/// Command-line interface and subcommand dispatch
pub mod cli;
/// Toolkit constants and defaults
pub mod configuration;
/// Error types and conversions
pub mod error;
/// Byte-level JPEG glitching
pub mod hack;
/// Image loading, saving and folder listing
pub mod image;
/// Progress bars for batch operations
pub mod progress;
